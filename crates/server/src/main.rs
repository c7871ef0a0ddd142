//! streambox server entry point.
//!
//! Boots the HTTP server: loads configuration, opens the cache
//! database, builds the live-source client, and serves the router.

use std::sync::Arc;

use anyhow::Result;
use streambox_client::{Endpoints, HttpLiveSource, SourceConfig};
use streambox_core::{AppConfig, CacheDb};
use tracing_subscriber::EnvFilter;

mod resolver;
mod routes;

use resolver::Resolver;
use routes::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = AppConfig::load()?;

    tracing::info!("opening cache at {}", config.db_path.display());
    let db = CacheDb::open(&config.db_path).await?;

    let source = HttpLiveSource::new(SourceConfig {
        user_agent: config.user_agent.clone(),
        timeout: config.timeout(),
    })?;

    let endpoints = Endpoints::new(&config.catalog_url, &config.search_url);
    let resolver = Resolver::new(db, Arc::new(source), endpoints);
    let state = AppState { resolver: Arc::new(resolver) };

    tracing::info!("listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, routes::app(state)).await?;

    Ok(())
}
