use serde::{Deserialize, Serialize};

/// An absent `message` field deserializes to an empty string and is rejected
/// by the handler, so `{}` gets the same 400 as `{"message":""}`.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
