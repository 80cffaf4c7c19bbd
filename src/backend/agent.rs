use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{info, warn};

use super::BackendError;
use crate::config::AgentConfig;

/// Subprocess strategy: the answer is whatever the agent script prints to
/// stdout for a single invocation.
pub struct AgentBackend {
    config: AgentConfig,
    timeout: Duration,
}

impl AgentBackend {
    pub fn new(config: AgentConfig, timeout_ms: u64) -> Self {
        Self {
            config,
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Runs `interpreter script <message>`. The message travels as a single
    /// positional argument and never through a shell.
    pub async fn ask(&self, message: &str) -> Result<String, BackendError> {
        let run = Command::new(&self.config.interpreter)
            .arg(&self.config.script)
            .arg(message)
            .kill_on_drop(true)
            .output();

        let output = timeout(self.timeout, run)
            .await
            .map_err(|_| BackendError::Timeout)?
            .map_err(BackendError::Spawn)?;

        if !output.status.success() {
            return Err(BackendError::AgentFailed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let answer = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if answer.is_empty() {
            return Err(BackendError::EmptyAnswer);
        }

        Ok(answer)
    }

    /// One-shot preparation run that makes sure the reference document is
    /// downloaded and indexed. Failures are logged and otherwise ignored so
    /// startup is never blocked on it.
    pub async fn ensure_index(&self) {
        if self.config.setup_args.is_empty() {
            return;
        }

        let result = Command::new(&self.config.interpreter)
            .args(&self.config.setup_args)
            .output()
            .await;

        match result {
            Ok(output) if output.status.success() => {
                info!("agent index ready");
            }
            Ok(output) => {
                warn!(
                    code = ?output.status.code(),
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "agent index setup failed"
                );
            }
            Err(err) => {
                warn!(error = %err, "could not launch agent index setup");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AgentBackend, BackendError};
    use crate::config::AgentConfig;

    fn backend(interpreter: &str, script: &str, timeout_ms: u64) -> AgentBackend {
        AgentBackend::new(
            AgentConfig {
                interpreter: interpreter.to_string(),
                script: script.to_string(),
                setup_args: Vec::new(),
            },
            timeout_ms,
        )
    }

    #[tokio::test]
    async fn message_is_passed_as_positional_argument() {
        let agent = backend("echo", "answer:", 5_000);
        let answer = agent.ask("hi").await.unwrap();
        assert_eq!(answer, "answer: hi");
    }

    #[tokio::test]
    async fn empty_stdout_is_an_error() {
        let agent = backend("true", "script", 5_000);
        assert!(matches!(
            agent.ask("hi").await,
            Err(BackendError::EmptyAnswer)
        ));
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let agent = backend("false", "script", 5_000);
        assert!(matches!(
            agent.ask("hi").await,
            Err(BackendError::AgentFailed { .. })
        ));
    }

    #[tokio::test]
    async fn missing_interpreter_is_a_spawn_error() {
        let agent = backend("/nonexistent/interpreter", "script", 5_000);
        assert!(matches!(agent.ask("hi").await, Err(BackendError::Spawn(_))));
    }

    #[tokio::test]
    async fn hung_script_times_out() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        script.write_all(b"sleep 5\n").unwrap();

        let agent = backend("sh", script.path().to_str().unwrap(), 100);
        assert!(matches!(agent.ask("hi").await, Err(BackendError::Timeout)));
    }
}
