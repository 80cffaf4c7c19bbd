pub mod api;
pub mod backend;
pub mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tracing::info;

use backend::Backend;
use config::AppConfig;

/// Read-only per-process state shared by every request handler.
pub struct AppState {
    pub backend: Backend,
    pub static_dir: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            backend: Backend::from_config(config),
            static_dir: config.static_dir.clone(),
        }
    }
}

pub fn build_app(state: Arc<AppState>) -> Router {
    api::router(state)
}

pub async fn run_server(app: Router, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind to port {port}"))?;

    info!(
        "listening on {}",
        listener
            .local_addr()
            .context("failed to get local address")?
    );

    axum::serve(listener, app)
        .await
        .context("server failed")?;

    Ok(())
}
