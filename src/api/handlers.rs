use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::AppState;

use super::models::{ChatRequest, ChatResponse, ErrorResponse};

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let message = payload.message.trim();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No message provided".to_string(),
            }),
        ));
    }

    match state.backend.ask(message).await {
        Ok(answer) => Ok(Json(ChatResponse { answer })),
        Err(err) => {
            error!(error = %err, "backend call failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch response".to_string(),
                }),
            ))
        }
    }
}

pub async fn healthz() -> &'static str {
    "OK"
}
