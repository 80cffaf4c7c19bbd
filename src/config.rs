use std::env;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Which backend strategy the process serves. Exactly one is active per
/// process; the two are never mixed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    OpenAi,
    Agent,
}

impl BackendKind {
    fn from_env_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "agent" => Some(Self::Agent),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub interpreter: String,
    pub script: String,
    /// Arguments for the one-shot index preparation run. Empty disables it.
    pub setup_args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: String,
    pub timeout_ms: u64,
    pub backend: BackendKind,
    pub openai: OpenAiConfig,
    pub agent: AgentConfig,
}

impl AppConfig {
    /// Reads configuration from the process environment once at startup.
    /// Missing or unparsable values fall back to defaults.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let static_dir = env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string());

        let timeout_ms = env::var("REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        let backend = env::var("CHAT_BACKEND")
            .ok()
            .and_then(|value| BackendKind::from_env_value(&value))
            .unwrap_or(BackendKind::OpenAi);

        let openai = OpenAiConfig {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-5".to_string()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        };

        let agent = AgentConfig {
            interpreter: env::var("AGENT_INTERPRETER").unwrap_or_else(|_| "python3".to_string()),
            script: env::var("AGENT_SCRIPT").unwrap_or_else(|_| "run_agent.py".to_string()),
            setup_args: env::var("AGENT_SETUP_ARGS")
                .unwrap_or_else(|_| "main.py setup-pdf".to_string())
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        };

        Self {
            port,
            static_dir,
            timeout_ms,
            backend,
            openai,
            agent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BackendKind;

    #[test]
    fn backend_kind_parses_known_values() {
        assert_eq!(
            BackendKind::from_env_value("openai"),
            Some(BackendKind::OpenAi)
        );
        assert_eq!(
            BackendKind::from_env_value("agent"),
            Some(BackendKind::Agent)
        );
        assert_eq!(
            BackendKind::from_env_value("  AGENT "),
            Some(BackendKind::Agent)
        );
    }

    #[test]
    fn backend_kind_rejects_unknown_values() {
        assert_eq!(BackendKind::from_env_value("ollama"), None);
        assert_eq!(BackendKind::from_env_value(""), None);
    }
}
