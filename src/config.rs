use config::{Config, ConfigBuilder, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{DEFAULT_TIMEOUT_SECS, KAKAO_API_BASE, KMA_API_BASE};
use crate::error::Result;

/// Runtime settings, read from `mountain-weather.toml` and
/// `MOUNTAIN_WEATHER_*` environment variables
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    kma_api_key: Option<String>,
    #[serde(default)]
    kakao_api_key: Option<String>,
    #[serde(default = "default_kma_api_base")]
    kma_api_base: String,
    #[serde(default = "default_kakao_api_base")]
    kakao_api_base: String,
    #[serde(default = "default_timeout_secs")]
    request_timeout_secs: u64,
}

fn default_kma_api_base() -> String {
    KMA_API_BASE.to_string()
}

fn default_kakao_api_base() -> String {
    KAKAO_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("mountain-weather").required(false))
                .add_source(Environment::with_prefix("MOUNTAIN_WEATHER")),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        Ok(builder.build()?.try_deserialize()?)
    }

    pub fn kma_api_key(&self) -> Option<&str> {
        non_blank(&self.kma_api_key)
    }

    pub fn kakao_api_key(&self) -> Option<&str> {
        non_blank(&self.kakao_api_key)
    }

    pub fn kma_api_base(&self) -> &str {
        self.kma_api_base.trim_end_matches('/')
    }

    pub fn kakao_api_base(&self) -> &str {
        self.kakao_api_base.trim_end_matches('/')
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn with_kma_api_base(mut self, base: impl Into<String>) -> Self {
        self.kma_api_base = base.into();
        self
    }

    pub fn with_kakao_api_base(mut self, base: impl Into<String>) -> Self {
        self.kakao_api_base = base.into();
        self
    }

    pub fn with_api_keys(mut self, kma: Option<&str>, kakao: Option<&str>) -> Self {
        self.kma_api_key = kma.map(str::to_string);
        self.kakao_api_key = kakao.map(str::to_string);
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            kma_api_key: None,
            kakao_api_key: None,
            kma_api_base: default_kma_api_base(),
            kakao_api_base: default_kakao_api_base(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
