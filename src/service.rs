use anyhow::Result;
use chrono::Utc;
use futures::future::join_all;
use reqwest::Client;
use rmcp::{
    handler::server::{wrapper::Parameters, ServerHandler, tool::ToolRouter},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
    ErrorData as McpError,
};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::constants::USER_AGENT;
use crate::error::WeatherError;
use crate::formatters::{
    format_grid, format_location_weather, format_mountain_list, format_mountain_weather,
    format_region_report, format_regions,
};
use crate::geocode::KakaoGeocoder;
use crate::grid::GeoCoordinate;
use crate::kma::KmaClient;
use crate::models::{CoordinatesRequest, MountainRequest, RegionRequest};
use crate::mountains;

/// MCP service answering mountain weather questions
#[derive(Clone)]
pub struct MountainWeather {
    client: Arc<Client>,
    config: Arc<AppConfig>,
    tool_router: ToolRouter<Self>,
}

impl MountainWeather {
    /// Creates a new service with one shared HTTP client
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            tool_router: Self::tool_router(),
        })
    }

    fn kma(&self) -> Result<KmaClient, McpError> {
        let key = self.config.kma_api_key().ok_or_else(|| {
            McpError::invalid_request(
                WeatherError::MissingApiKey("MOUNTAIN_WEATHER_KMA_API_KEY").to_string(),
                None,
            )
        })?;
        Ok(KmaClient::new(self.client.clone(), self.config.kma_api_base(), key))
    }

    fn geocoder(&self) -> KakaoGeocoder {
        KakaoGeocoder::new(
            self.client.clone(),
            self.config.kakao_api_base(),
            self.config.kakao_api_key(),
        )
    }

    /// Blank means every region; anything else must name a catalog region.
    fn region_filter(region: Option<&str>) -> Result<Option<&'static str>, McpError> {
        let Some(requested) = region.map(str::trim).filter(|r| !r.is_empty()) else {
            return Ok(None);
        };

        mountains::resolve_region(requested).map(Some).ok_or_else(|| {
            McpError::invalid_params(
                format!(
                    "Unknown region '{}'. Known regions: {}",
                    requested,
                    mountains::regions().join(", ")
                ),
                None,
            )
        })
    }

    pub fn regions_report(&self) -> String {
        format_regions(&mountains::regions())
    }

    pub fn mountain_list_report(&self, region: Option<&str>) -> Result<String, McpError> {
        let region = Self::region_filter(region)?;
        Ok(format_mountain_list(&mountains::filter_by_region(region)))
    }

    pub fn grid_report(&self, latitude: f64, longitude: f64) -> String {
        let coordinate = GeoCoordinate::new(latitude, longitude);
        format_grid(coordinate, coordinate.to_grid())
    }

    pub async fn mountain_weather_report(&self, name: &str) -> Result<String, McpError> {
        let mountain = mountains::find(name).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown mountain '{}'", name.trim()), None)
        })?;
        let kma = self.kma()?;
        let grid = mountain.grid();

        tracing::info!("{} grid coordinates: nx={} ny={}", mountain.name, grid.x, grid.y);

        let observation = kma.current_conditions(grid, Utc::now()).await.map_err(|e| {
            McpError::internal_error(
                format!("Failed to fetch weather for {}: {}", mountain.name, e),
                None,
            )
        })?;

        Ok(format_mountain_weather(mountain, grid, &observation))
    }

    pub async fn region_weather_report(&self, region: Option<&str>) -> Result<String, McpError> {
        let region = Self::region_filter(region)?;
        let kma = self.kma()?;
        let selected = mountains::filter_by_region(region);
        let now = Utc::now();

        // One request per mountain; a failure only affects its own entry.
        let results = join_all(selected.iter().map(|mountain| {
            let kma = &kma;
            async move {
                let result = kma.current_conditions(mountain.grid(), now).await;
                if let Err(e) = &result {
                    tracing::warn!("Weather lookup for {} failed: {}", mountain.name, e);
                }
                result
            }
        }))
        .await;

        let entries: Vec<_> = selected.into_iter().zip(results).collect();
        Ok(format_region_report(region, &entries))
    }

    pub async fn location_weather_report(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, McpError> {
        let kma = self.kma()?;
        let geocoder = self.geocoder();
        let coordinate = GeoCoordinate::new(latitude, longitude);
        let grid = coordinate.to_grid();

        let (observation, place) = tokio::join!(
            kma.current_conditions(grid, Utc::now()),
            geocoder.place_name(coordinate)
        );

        let observation = observation.map_err(|e| {
            McpError::internal_error(format!("Failed to fetch weather: {}", e), None)
        })?;

        Ok(format_location_weather(&place, coordinate, grid, &observation))
    }
}

#[tool_handler]
impl ServerHandler for MountainWeather {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "mountain-weather".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some(
                "Current weather for Korean mountains, powered by the Korea Meteorological \
                Administration nowcast API. List mountains by region, check conditions on a \
                single mountain or a whole region, or look up any coordinate in South Korea."
                    .to_string(),
            ),
        }
    }
}

#[tool_router]
impl MountainWeather {
    #[tool(description = "List the regions that have mountains in the catalog.")]
    async fn list_regions(&self) -> Result<CallToolResult, McpError> {
        Ok(CallToolResult::success(vec![Content::text(self.regions_report())]))
    }

    #[tool(description = "List mountains in the catalog with height, region and coordinates. Optionally filter by region (e.g. 'Gangwon-do').")]
    async fn list_mountains(
        &self,
        Parameters(request): Parameters<RegionRequest>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = self.mountain_list_report(request.region.as_deref())?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Get current weather on a mountain: temperature, humidity, wind and precipitation. Provide the mountain name, romanized (e.g. 'Seoraksan') or in Korean (e.g. '설악산').")]
    async fn get_mountain_weather(
        &self,
        Parameters(request): Parameters<MountainRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!("Getting weather for mountain: {}", request.name);

        let formatted = self.mountain_weather_report(&request.name).await?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Get current weather for every mountain in a region, or for all mountains when no region is given. Mountains whose data is unavailable are reported individually.")]
    async fn get_region_weather(
        &self,
        Parameters(request): Parameters<RegionRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting weather for region: {}",
            request.region.as_deref().unwrap_or("all")
        );

        let formatted = self.region_weather_report(request.region.as_deref()).await?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Get current weather at a latitude/longitude in South Korea (e.g. latitude: 37.5665, longitude: 126.978 for Seoul), with the nearest administrative area name.")]
    async fn get_location_weather(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        tracing::info!(
            "Getting weather for coordinates: {}, {}",
            request.latitude,
            request.longitude
        );

        let formatted = self
            .location_weather_report(request.latitude, request.longitude)
            .await?;
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }

    #[tool(description = "Convert a latitude/longitude to the KMA forecast grid cell (nx, ny).")]
    async fn convert_grid(
        &self,
        Parameters(request): Parameters<CoordinatesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let formatted = self.grid_report(request.latitude, request.longitude);
        Ok(CallToolResult::success(vec![Content::text(formatted)]))
    }
}
