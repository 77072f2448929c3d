use crate::error::WeatherError;
use crate::grid::{GeoCoordinate, GridCoordinate};
use crate::models::Observation;
use crate::mountains::Mountain;

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Converts a wind bearing in degrees to an 8-point compass label
pub fn wind_direction_label(degrees: f64) -> &'static str {
    let sector = (degrees / 45.0).round() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}

/// Formats current conditions under a title line
pub fn format_conditions(title: &str, observation: &Observation) -> String {
    format!("{}\n{}", title, conditions_lines(observation))
}

fn conditions_lines(observation: &Observation) -> String {
    format!(
        "  Conditions: {}\n  Temperature: {:.1}\u{00b0}C\n  Humidity: {}%\n  Wind: {} m/s {} ({}\u{00b0})\n  Precipitation (1h): {} mm\n  Observed: {} {} KST\n",
        observation.precipitation_type.label(),
        observation.temperature,
        observation.humidity,
        observation.wind_speed,
        wind_direction_label(observation.wind_direction),
        observation.wind_direction,
        observation.precipitation,
        observation.base_date,
        observation.base_time,
    )
}

fn location_line(coordinate: GeoCoordinate, grid: GridCoordinate) -> String {
    format!(
        "  Coordinates: {}, {} (grid {}, {})\n",
        coordinate.latitude, coordinate.longitude, grid.x, grid.y
    )
}

fn mountain_heading(mountain: &Mountain) -> String {
    format!(
        "{} ({}) {}m - {}",
        mountain.name, mountain.korean_name, mountain.height_m, mountain.region
    )
}

/// Formats a single mountain's report
pub fn format_mountain_weather(
    mountain: &Mountain,
    grid: GridCoordinate,
    observation: &Observation,
) -> String {
    format!(
        "{}\n{}{}",
        mountain_heading(mountain),
        location_line(mountain.coordinate(), grid),
        conditions_lines(observation)
    )
}

/// Formats a multi-mountain report; failed entries show their error inline
pub fn format_region_report(
    region: Option<&str>,
    entries: &[(&Mountain, Result<Observation, WeatherError>)],
) -> String {
    let mut output = format!(
        "Mountain Weather ({}):\n\n",
        region.unwrap_or("all regions")
    );

    for (mountain, result) in entries {
        match result {
            Ok(observation) => {
                output.push_str(&format_conditions(&mountain_heading(mountain), observation));
            }
            Err(e) => {
                output.push_str(&format!("{}\n  Error: {}\n", mountain_heading(mountain), e));
            }
        }
        output.push('\n');
    }
    output
}

/// Formats conditions for an arbitrary coordinate
pub fn format_location_weather(
    place: &str,
    coordinate: GeoCoordinate,
    grid: GridCoordinate,
    observation: &Observation,
) -> String {
    format!(
        "{}\n{}{}",
        place,
        location_line(coordinate, grid),
        conditions_lines(observation)
    )
}

pub fn format_mountain_list(mountains: &[&Mountain]) -> String {
    if mountains.is_empty() {
        return "No mountains found.".to_string();
    }

    let mut output = String::from("Mountains:\n\n");
    for mountain in mountains {
        output.push_str(&format!(
            "- {} ({:.3}, {:.3})\n",
            mountain_heading(mountain),
            mountain.latitude,
            mountain.longitude
        ));
    }
    output
}

pub fn format_regions(regions: &[&str]) -> String {
    let mut output = String::from("Regions:\n");
    for region in regions {
        output.push_str(&format!("- {}\n", region));
    }
    output
}

pub fn format_grid(coordinate: GeoCoordinate, grid: GridCoordinate) -> String {
    format!(
        "Latitude {}, longitude {} -> KMA grid nx={}, ny={}",
        coordinate.latitude, coordinate.longitude, grid.x, grid.y
    )
}
