mod api;
mod app;
mod config;
mod domain;
mod error;
mod logging;
mod middleware;
mod render;
mod routes;
mod services;


use anyhow::Result;
use std::sync::Arc;

use domain::ThreadRandom;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        analysis_delay_ms = settings.analysis_delay_ms,
        "Starting FINOVA site"
    );

    // Create application state
    let state = app::AppState::new(settings.clone(), Arc::new(ThreadRandom));

    // Evict abandoned demo views in the background
    let _sweeper = state
        .views
        .spawn_sweeper(settings.view_ttl(), settings.view_sweep_interval());

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
