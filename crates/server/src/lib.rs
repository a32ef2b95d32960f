//! Server crate for the GameRecs review API.
//!
//! This crate contains the recommender service and the HTTP layer that
//! exposes it alongside the charting aggregates.

pub mod api;
pub mod config;
pub mod error;
pub mod recommender;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use data_loader::GameDataset;

pub use api::{AppState, create_router};
pub use config::ServerConfig;
pub use error::{RecommendError, RecommendResult};
pub use recommender::{GameRecommendation, GameRecommender};

/// Bind to `config` and serve the API until the process is stopped.
pub async fn serve(config: &ServerConfig, dataset: Arc<GameDataset>) -> Result<()> {
    let app = create_router(AppState::new(dataset));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Serving game review API on http://{}", address);
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated")?;
    Ok(())
}
