use thiserror::Error;

/// Errors raised while fetching and validating upstream weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("{0} is not configured")]
    MissingApiKey(&'static str),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request failed with status: {0}")]
    Status(u16),

    #[error("KMA API error {code}: {message}")]
    Api { code: String, message: String },

    #[error("No weather data for this location")]
    NoData,

    #[error("Missing weather categories: {}", .0.join(", "))]
    MissingCategories(Vec<String>),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

// Request URLs carry the KMA service key, so they never make it into messages.
impl From<reqwest::Error> for WeatherError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network(error.without_url())
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;
