mod handlers;
mod models;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::AppState;

pub use models::{ChatRequest, ChatResponse, ErrorResponse};

/// Builds the full HTTP surface: the chat relay endpoint, a health probe,
/// and the static client served for everything else.
pub fn router(state: Arc<AppState>) -> Router {
    let static_files = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/healthz", get(handlers::healthz))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
