mod agent;
mod openai;

pub use agent::AgentBackend;
pub use openai::OpenAiBackend;

use std::io;

use thiserror::Error;

use crate::config::{AppConfig, BackendKind};

/// Failure of a single backend call. Callers collapse every variant into one
/// generic wire error; the detail here is for server-side logs only.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,
    #[error("backend call timed out")]
    Timeout,
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion response contained no answer text")]
    NoAnswer,
    #[error("failed to launch agent script: {0}")]
    Spawn(#[source] io::Error),
    #[error("agent script exited with code {code:?}: {stderr}")]
    AgentFailed { code: Option<i32>, stderr: String },
    #[error("backend produced an empty answer")]
    EmptyAnswer,
}

/// The configured backend strategy. One per process, chosen at startup.
pub enum Backend {
    OpenAi(OpenAiBackend),
    Agent(AgentBackend),
}

impl Backend {
    pub fn from_config(config: &AppConfig) -> Self {
        match config.backend {
            BackendKind::OpenAi => {
                Self::OpenAi(OpenAiBackend::new(config.openai.clone(), config.timeout_ms))
            }
            BackendKind::Agent => {
                Self::Agent(AgentBackend::new(config.agent.clone(), config.timeout_ms))
            }
        }
    }

    /// Forwards one message and returns the trimmed answer text.
    pub async fn ask(&self, message: &str) -> Result<String, BackendError> {
        match self {
            Self::OpenAi(backend) => backend.ask(message).await,
            Self::Agent(backend) => backend.ask(message).await,
        }
    }

    /// Best-effort startup preparation. Never fails; the agent strategy uses
    /// it to make sure the reference document is downloaded and indexed.
    pub async fn prepare(&self) {
        if let Self::Agent(backend) = self {
            backend.ensure_index().await;
        }
    }
}
