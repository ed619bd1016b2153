//! HTTP server for the travel recommendation engine.
//!
//! Loads the artifacts once, then serves recommendations and the
//! itinerary planner until shut down.

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{AppState, Config, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,server=debug,sources=debug,pipeline=debug")),
        )
        .init();

    info!("Starting travel recommendation server");
    let config = Config::from_env()?;

    info!("Loading artifacts from {}...", config.artifacts_dir.display());
    let state = AppState::from_config(&config)?;
    let (places, pivot_rows, catalog) = state.store.counts();
    info!(
        "Artifacts loaded: {} places, {} rated cities, {} selectable",
        places, pivot_rows, catalog
    );

    let app = create_router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Server running on http://{}", address);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
