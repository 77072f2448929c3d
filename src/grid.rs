//! Latitude/longitude to KMA grid conversion.
//!
//! The KMA nowcast API addresses observations by a 5 km cell on a Lambert
//! Conformal Conic projection with standard parallels at 30°N and 60°N,
//! centred on 38°N 126°E. Off-by-one cells silently return a neighbour's
//! weather, so rounding here follows the provider's reference routine exactly.

use std::f64::consts::PI;

/// Earth radius in km
const RE: f64 = 6371.00877;
/// Grid spacing in km
const GRID: f64 = 5.0;
/// Standard parallels (degrees)
const SLAT1: f64 = 30.0;
const SLAT2: f64 = 60.0;
/// Projection origin (degrees)
const OLON: f64 = 126.0;
const OLAT: f64 = 38.0;
/// Grid cell of the projection origin
const XO: f64 = 43.0;
const YO: f64 = 136.0;

const DEGRAD: f64 = PI / 180.0;

/// Geographic coordinate in decimal degrees (WGS84)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn to_grid(self) -> GridCoordinate {
        convert(self.latitude, self.longitude)
    }
}

/// Cell index on the KMA observation grid, sent as `nx`/`ny`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoordinate {
    pub x: i32,
    pub y: i32,
}

/// Converts a latitude/longitude pair to the KMA grid cell containing it.
///
/// Total over finite input. Points outside the Korean peninsula still produce
/// a cell, it just isn't one the API serves.
pub fn convert(lat: f64, lon: f64) -> GridCoordinate {
    let (x, y) = project(lat, lon);
    GridCoordinate {
        x: round_half_up(x),
        y: round_half_up(y),
    }
}

/// Continuous projected position in grid units, before rounding.
pub(crate) fn project(lat: f64, lon: f64) -> (f64, f64) {
    let re = RE / GRID;
    let slat1 = SLAT1 * DEGRAD;
    let slat2 = SLAT2 * DEGRAD;
    let olon = OLON * DEGRAD;
    let olat = OLAT * DEGRAD;

    let sn = (slat1.cos() / slat2.cos()).ln()
        / ((PI * 0.25 + slat2 * 0.5).tan() / (PI * 0.25 + slat1 * 0.5).tan()).ln();
    let sf = (PI * 0.25 + slat1 * 0.5).tan().powf(sn) * slat1.cos() / sn;
    let ro = re * sf / (PI * 0.25 + olat * 0.5).tan().powf(sn);

    let ra = re * sf / (PI * 0.25 + lat * DEGRAD * 0.5).tan().powf(sn);
    let theta = normalize_angle(lon * DEGRAD - olon) * sn;

    (ra * theta.sin() + XO, ro - ra * theta.cos() + YO)
}

/// Brings a longitude difference back within half a turn of the origin.
/// Input is assumed to be within one full turn, so one correction suffices.
fn normalize_angle(theta: f64) -> f64 {
    if theta > PI {
        theta - 2.0 * PI
    } else if theta < -PI {
        theta + 2.0 * PI
    } else {
        theta
    }
}

fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
