//! Movie recommendation HTTP server.
//!
//! Loads the catalog, builds the similarity engine once, then serves queries.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use catalog::Catalog;
use engine::SimilarityEngine;
use server::{AppState, Config, create_router};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::parse();
    info!("Starting movie recommendation server with {:?}", config);

    // The build is CPU-bound; keep it off the async workers
    let data = config.data.clone();
    let engine = tokio::task::spawn_blocking(move || SimilarityEngine::build(Catalog::load(&data)))
        .await
        .context("Engine build task failed")?;
    info!(
        "Engine {} with {} movies",
        engine.status().as_str(),
        engine.len()
    );

    let app = create_router(AppState::new(Arc::new(engine)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
