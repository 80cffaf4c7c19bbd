use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::time::{timeout, Duration};

use super::BackendError;
use crate::config::OpenAiConfig;

/// Hosted chat-completions strategy: one single-turn conversation per ask.
pub struct OpenAiBackend {
    config: OpenAiConfig,
    client: Client,
    timeout: Duration,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage<'a>>,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiBackend {
    pub fn new(config: OpenAiConfig, timeout_ms: u64) -> Self {
        Self {
            config,
            client: Client::new(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    pub async fn ask(&self, message: &str) -> Result<String, BackendError> {
        if self.config.api_key.is_empty() {
            return Err(BackendError::MissingApiKey);
        }

        let payload = CompletionRequest {
            model: &self.config.model,
            messages: vec![RequestMessage {
                role: "user",
                content: message,
            }],
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let request = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send();

        let response = timeout(self.timeout, request)
            .await
            .map_err(|_| BackendError::Timeout)??;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Api { status, body });
        }

        let completion: CompletionResponse = response.json().await?;
        first_choice_text(completion)
    }
}

/// Takes the first choice's text content and trims surrounding whitespace.
fn first_choice_text(completion: CompletionResponse) -> Result<String, BackendError> {
    let content = completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(BackendError::NoAnswer)?;

    let answer = content.trim();
    if answer.is_empty() {
        return Err(BackendError::EmptyAnswer);
    }

    Ok(answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::{first_choice_text, BackendError, CompletionResponse};

    fn parse(json: &str) -> CompletionResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn answer_is_trimmed() {
        let completion =
            parse(r#"{"choices":[{"message":{"role":"assistant","content":" Hi there! "}}]}"#);
        assert_eq!(first_choice_text(completion).unwrap(), "Hi there!");
    }

    #[test]
    fn missing_choices_is_no_answer() {
        let completion = parse(r#"{"choices":[]}"#);
        assert!(matches!(
            first_choice_text(completion),
            Err(BackendError::NoAnswer)
        ));
    }

    #[test]
    fn null_content_is_no_answer() {
        let completion = parse(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#);
        assert!(matches!(
            first_choice_text(completion),
            Err(BackendError::NoAnswer)
        ));
    }

    #[test]
    fn whitespace_only_content_is_empty_answer() {
        let completion = parse(r#"{"choices":[{"message":{"content":"   "}}]}"#);
        assert!(matches!(
            first_choice_text(completion),
            Err(BackendError::EmptyAnswer)
        ));
    }
}
