//! Current weather for Korean mountains.
//!
//! Coordinates are projected onto the KMA forecast grid, the ultra-short-term
//! nowcast is fetched for that cell, and the result is served as MCP tools.

pub mod config;
pub mod constants;
pub mod error;
pub mod formatters;
pub mod geocode;
pub mod grid;
pub mod kma;
pub mod models;
pub mod mountains;
pub mod service;

pub use config::AppConfig;
pub use error::WeatherError;
pub use grid::{convert, GeoCoordinate, GridCoordinate};
pub use service::MountainWeather;
