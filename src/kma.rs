//! Client for the KMA ultra-short-term nowcast (`getUltraSrtNcst`).

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Asia::Seoul;
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

use crate::constants::REQUIRED_CATEGORIES;
use crate::error::{Result, WeatherError};
use crate::grid::GridCoordinate;
use crate::models::{NowcastEnvelope, Observation, PrecipitationType};

#[derive(Debug, Clone)]
pub struct KmaClient {
    client: Arc<Client>,
    base_url: String,
    service_key: String,
}

impl KmaClient {
    pub fn new(client: Arc<Client>, base_url: &str, service_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key: service_key.to_string(),
        }
    }

    /// Fetches the latest published nowcast for a grid cell.
    pub async fn current_conditions(
        &self,
        grid: GridCoordinate,
        now: DateTime<Utc>,
    ) -> Result<Observation> {
        let (base_date, base_time) = base_datetime(now);
        let url = self.nowcast_url(grid, &base_date, &base_time);

        tracing::debug!(
            "Requesting nowcast for nx={} ny={} at {} {}",
            grid.x,
            grid.y,
            base_date,
            base_time
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(WeatherError::Status(response.status().as_u16()));
        }

        let envelope = response.json::<NowcastEnvelope>().await?;
        parse_observation(envelope, base_date, base_time)
    }

    // The service key is issued URL-encoded, so the URL is assembled by hand
    // to keep it from being encoded twice.
    fn nowcast_url(&self, grid: GridCoordinate, base_date: &str, base_time: &str) -> String {
        format!(
            "{}/getUltraSrtNcst?serviceKey={}&numOfRows=10&pageNo=1&base_date={}&base_time={}&nx={}&ny={}&dataType=JSON",
            self.base_url, self.service_key, base_date, base_time, grid.x, grid.y
        )
    }
}

/// Latest nowcast slot for `now`: the previous full hour in KST.
///
/// Date and hour come from the same instant, so 00:30 KST resolves to 23:00
/// of the previous day.
pub fn base_datetime(now: DateTime<Utc>) -> (String, String) {
    let slot = now.with_timezone(&Seoul) - Duration::hours(1);
    (
        slot.format("%Y%m%d").to_string(),
        slot.format("%H00").to_string(),
    )
}

/// Validates a nowcast payload and extracts the conditions from it.
pub fn parse_observation(
    envelope: NowcastEnvelope,
    base_date: String,
    base_time: String,
) -> Result<Observation> {
    let response = envelope.response;

    if response.header.result_code != "00" {
        return Err(WeatherError::Api {
            code: response.header.result_code,
            message: response.header.result_msg,
        });
    }

    let items = response
        .body
        .and_then(|body| body.items)
        .map(|items| items.item)
        .unwrap_or_default();

    if items.is_empty() {
        return Err(WeatherError::NoData);
    }

    let mut values: HashMap<String, f64> = HashMap::new();
    for item in items {
        match item.obsr_value.trim().parse::<f64>() {
            Ok(value) => {
                values.insert(item.category, value);
            }
            Err(_) => {
                tracing::debug!(
                    "Skipping {} with non-numeric value {:?}",
                    item.category,
                    item.obsr_value
                );
            }
        }
    }

    let missing: Vec<String> = REQUIRED_CATEGORIES
        .iter()
        .filter(|category| !values.contains_key(**category))
        .map(|category| category.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(WeatherError::MissingCategories(missing));
    }

    let value = |category: &str| values.get(category).copied().unwrap_or(0.0);

    Ok(Observation {
        temperature: value("T1H"),
        humidity: value("REH"),
        wind_speed: value("WSD"),
        wind_direction: value("VEC"),
        precipitation: value("RN1"),
        precipitation_type: PrecipitationType::from_code(value("PTY").round() as i32),
        base_date,
        base_time,
    })
}
