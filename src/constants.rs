/// User agent string for HTTP requests
pub const USER_AGENT: &str = "mountain-weather/0.1.0";

/// KMA short-term forecast service base URL
pub const KMA_API_BASE: &str = "http://apis.data.go.kr/1360000/VilageFcstInfoService_2.0";

/// Kakao Local API base URL
pub const KAKAO_API_BASE: &str = "https://dapi.kakao.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Categories a nowcast must carry to be usable
pub const REQUIRED_CATEGORIES: [&str; 4] = ["T1H", "REH", "WSD", "PTY"];

/// Fallback place names when reverse geocoding yields nothing
pub const UNKNOWN_PLACE: &str = "Unknown location";
pub const UNAVAILABLE_PLACE: &str = "Location unavailable";
