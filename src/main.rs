//! WanderWise Server - trip itinerary planner

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wanderwise_server::{
    config::AppConfig, create_router, presentation::PageRenderer, services::Services, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("wanderwise_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting WanderWise Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.credentials() {
        tracing::warn!("{}", e);
    }

    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let services = Services::new(&config).context("Failed to create services")?;
    let renderer = PageRenderer::new().context("Failed to load page templates")?;

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        renderer: Arc::new(renderer),
    };

    let app = create_router(state);

    let addr = SocketAddr::new(
        server_host.parse().context("Invalid host address")?,
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
