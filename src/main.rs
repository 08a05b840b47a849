use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use itinerary_pdf::config::AppConfig;
use itinerary_pdf::resources::RenderResources;
use itinerary_pdf::routes::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = AppConfig::from_env();
    let resources = Arc::new(RenderResources::load(&config.brand));
    tracing::info!(
        brand = %resources.brand.site_name,
        logo = resources.logo.is_some(),
        "🎨 Render resources ready"
    );

    let app = router(AppState::new(resources));

    let addr = config.addr;
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
