use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use chat_relay::{build_app, config::AppConfig, run_server, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();
    let state = Arc::new(AppState::from_config(&config));

    // Index preparation must never delay or block startup.
    let prepare = state.clone();
    tokio::spawn(async move { prepare.backend.prepare().await });

    let app = build_app(state);
    run_server(app, config.port).await
}
