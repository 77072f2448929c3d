use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ============================================================================
// KMA Nowcast API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct NowcastEnvelope {
    pub response: NowcastResponse,
}

#[derive(Debug, Deserialize)]
pub struct NowcastResponse {
    pub header: NowcastHeader,
    pub body: Option<NowcastBody>,
}

#[derive(Debug, Deserialize)]
pub struct NowcastHeader {
    #[serde(rename = "resultCode")]
    pub result_code: String,
    #[serde(rename = "resultMsg")]
    pub result_msg: String,
}

#[derive(Debug, Deserialize)]
pub struct NowcastBody {
    pub items: Option<NowcastItems>,
}

#[derive(Debug, Deserialize)]
pub struct NowcastItems {
    #[serde(default)]
    pub item: Vec<NowcastItem>,
}

#[derive(Debug, Deserialize)]
pub struct NowcastItem {
    pub category: String,
    #[serde(rename = "obsrValue")]
    pub obsr_value: String,
}

// ============================================================================
// Kakao Local API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct Coord2AddressResponse {
    #[serde(default)]
    pub documents: Vec<AddressDocument>,
}

#[derive(Debug, Deserialize)]
pub struct AddressDocument {
    pub address: Option<Address>,
}

#[derive(Debug, Deserialize)]
pub struct Address {
    pub region_1depth_name: String,
    pub region_2depth_name: String,
}

// ============================================================================
// Domain Models
// ============================================================================

/// KMA `PTY` precipitation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationType {
    Clear,
    Rain,
    RainSnow,
    Snow,
    Shower,
    Raindrops,
    RaindropsSnowFlurries,
    SnowFlurries,
    /// A code outside the published table, kept so callers can report it
    Unknown(i32),
}

impl PrecipitationType {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Clear,
            1 => Self::Rain,
            2 => Self::RainSnow,
            3 => Self::Snow,
            4 => Self::Shower,
            5 => Self::Raindrops,
            6 => Self::RaindropsSnowFlurries,
            7 => Self::SnowFlurries,
            other => Self::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rain => "Rain",
            Self::RainSnow => "Rain/Snow",
            Self::Snow => "Snow",
            Self::Shower => "Showers",
            Self::Raindrops => "Raindrops",
            Self::RaindropsSnowFlurries => "Raindrops/Snow flurries",
            Self::SnowFlurries => "Snow flurries",
            Self::Unknown(_) => "Unknown",
        }
    }
}

/// Current conditions for one grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// °C
    pub temperature: f64,
    /// %
    pub humidity: f64,
    /// m/s
    pub wind_speed: f64,
    /// degrees
    pub wind_direction: f64,
    /// mm over the last hour
    pub precipitation: f64,
    pub precipitation_type: PrecipitationType,
    pub base_date: String,
    pub base_time: String,
}

// ============================================================================
// MCP Tool Request Models
// ============================================================================

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct RegionRequest {
    /// Region name (e.g. "Gangwon-do"); omit for every region
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct MountainRequest {
    /// Mountain name, romanized (e.g. "Seoraksan") or Korean (e.g. "설악산")
    pub name: String,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
pub struct CoordinatesRequest {
    pub latitude: f64,
    pub longitude: f64,
}
