use crate::{
    assets::AssetStore,
    config::Config,
    handler::{self, AppState, SharedState},
};
use anyhow::{Context, Result};
use axum::{Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

pub fn router(config: &Config) -> Router {
    let state: SharedState = Arc::new(AppState::new(AssetStore::new(
        config.assets_dir.clone(),
        config.fetch_timeout(),
    )));

    Router::new()
        .route(&config.route, get(handler::level))
        .route("/health", get(handler::health))
        .with_state(state)
}

pub async fn serve(config: Config) -> Result<()> {
    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("bind {} failed", config.listen_addr))?;

    log::info!(
        "serving {} on {} (assets: {})",
        config.route,
        listener.local_addr()?,
        config.assets_dir.display()
    );

    axum::serve(listener, router(&config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("listen for ctrl-c failed: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}
