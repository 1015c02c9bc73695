/// LLM Client — the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the inference API directly.
/// All LLM interactions go through the `TextGenerator` trait defined here, so
/// the analysis pipeline can be driven by a scripted generator in tests.
///
/// The production backend speaks the OpenAI-compatible chat-completions
/// protocol exposed by NVIDIA NIM.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod parsing;
pub mod prompts;

use prompts::{DEFAULT_MAX_TOKENS, DEFAULT_SYSTEM_PROMPT, DEFAULT_TEMPERATURE};

/// Hard ceiling for a single HTTP exchange, independent of caller timeouts.
const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("text generation is not configured (missing API key)")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),
}

/// One request to the text-generation collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// The text-generation collaborator. Failures are typed, never sentinel strings.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

/// Runs a generation call under a caller-imposed timeout.
/// An elapsed timeout surfaces as `LlmError::Timeout`, like any other failure.
pub async fn generate_with_timeout(
    generator: &dyn TextGenerator,
    request: &GenerationRequest,
    timeout: Duration,
) -> Result<String, LlmError> {
    match tokio::time::timeout(timeout, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(LlmError::Timeout(timeout)),
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Settings for the production client, taken from `Config`.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_retries: u32,
}

/// The OpenAI-compatible client used in production.
/// Retries 429 and 5xx responses with exponential backoff at this boundary only.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    /// Makes a raw call to the chat-completions API, returning the full response object.
    pub async fn call(
        &self,
        request: &GenerationRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        if self.settings.api_key.trim().is_empty() {
            return Err(LlmError::NotConfigured);
        }

        let body = ChatCompletionRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let endpoint = self.endpoint();
        let attempts = self.settings.max_retries + 1;
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1).min(5)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&endpoint)
                .bearer_auth(&self.settings.api_key)
                .json(&body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 {
                warn!("LLM API rate limited (attempt {})", attempt + 1);
                last_error = Some(LlmError::RateLimited {
                    retries: self.settings.max_retries,
                });
                continue;
            }

            if status.is_server_error() {
                let text = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, text);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: text,
                });
                continue;
            }

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                    .map(|e| e.error.message)
                    .unwrap_or(text);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let completion = parse_completion(&response.text().await?)?;

            if let Some(usage) = &completion.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return Ok(completion);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.settings.max_retries,
        }))
    }
}

/// Decodes a chat-completions body. A malformed body is `LlmError::Parse`.
fn parse_completion(raw: &str) -> Result<ChatCompletionResponse, LlmError> {
    Ok(serde_json::from_str(raw)?)
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let completion = self.call(request).await?;
        match completion.text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(LlmError::EmptyContent),
        }
    }
}

/// Scripted generator for tests: replies are served in order and every
/// request is recorded.
#[cfg(test)]
pub mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{GenerationRequest, LlmError, TextGenerator};

    #[derive(Default)]
    pub struct ScriptedGenerator {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        calls: Mutex<Vec<GenerationRequest>>,
        delay: Option<Duration>,
    }

    impl ScriptedGenerator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, text: &str) -> Self {
            self.replies
                .lock()
                .unwrap()
                .push_back(Ok(text.to_string()));
            self
        }

        pub fn fail(self, err: LlmError) -> Self {
            self.replies.lock().unwrap().push_back(Err(err));
            self
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> Vec<GenerationRequest> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyContent))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    fn settings(api_key: &str) -> LlmSettings {
        LlmSettings {
            api_key: api_key.to_string(),
            base_url: "https://inference.example.test/v1/".to_string(),
            model: "test-model".to_string(),
            max_retries: 0,
        }
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = LlmClient::new(settings("key")).unwrap();
        assert_eq!(
            client.endpoint(),
            "https://inference.example.test/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_without_network() {
        let client = LlmClient::new(settings("  ")).unwrap();
        let err = client
            .generate(&GenerationRequest::new("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NotConfigured));
    }

    #[test]
    fn test_request_builder_defaults() {
        let request = GenerationRequest::new("prompt").max_tokens(300).temperature(0.3);
        assert_eq!(request.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(request.max_tokens, 300);
        assert!((request.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_completion_text_reads_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Python, AWS"}}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        }"#;
        let completion = parse_completion(json).unwrap();
        assert_eq!(completion.text(), Some("Python, AWS"));
    }

    #[test]
    fn test_malformed_completion_body_is_parse_error() {
        let err = parse_completion("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));

        let err = parse_completion(r#"{"id": "cmpl-1"}"#).unwrap_err();
        assert!(matches!(err, LlmError::Parse(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_timeout_error() {
        let generator = ScriptedGenerator::new()
            .reply("late")
            .with_delay(Duration::from_secs(30));
        let err = generate_with_timeout(
            &generator,
            &GenerationRequest::new("prompt"),
            Duration::from_secs(5),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, LlmError::Timeout(_)));
    }
}
