use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mountain_weather::{AppConfig, MountainWeather};

#[tokio::main]
async fn main() -> Result<()> {
    // Stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mountain_weather=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting MCP mountain weather server");

    let config = AppConfig::load()?;
    if config.kma_api_key().is_none() {
        tracing::warn!("MOUNTAIN_WEATHER_KMA_API_KEY is not set; weather tools will be unavailable");
    }

    let service = MountainWeather::new(config)?;
    let server = service.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
