/**
 * GALAXY NODE - survey node serving its star system
 *
 * ROLE: peer polled by galaxy-collector. Answers GET /system with the star
 * system described in node.yaml (or GALAXY_NODE_CONFIG).
 *
 * ENV: GALAXY_NODE_CONFIG (yaml path), GALAXY_NODE_ADDR (listen address),
 * RUST_LOG (log filter). A .env file is honoured.
 */

mod config;
mod http;
mod models;

use crate::config::{listen_addr, load_config};
use crate::http::AppState;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let node = load_config().await.context("failed to load node config")?;
    info!(
        "node {} (class {}, {}) at ({}, {}, {})",
        node.name, node.star_type.class, node.star_type.description,
        node.position.x, node.position.y, node.position.z
    );

    let app = http::build_router(AppState { node: Arc::new(node) });

    let addr = listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!("listening on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
