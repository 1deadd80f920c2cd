/// LLM Client: the single point of entry for all provider calls in Guidebook.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Text generation goes through `TextGenerator`, image generation through `ImageGenerator`.
/// `OpenAiClient` implements both against the OpenAI-compatible REST API.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;
#[cfg(test)]
pub mod testing;

const TEMPERATURE: f32 = 0.7;
const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 120;
const IMAGE_DOWNLOAD_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LlmError {
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
}

/// One turn of a conversation. `role` is "system", "user" or "assistant".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A fully specified completion call: model, optional system instruction,
/// conversation turns, and output budget.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<ChatTurn>,
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Single-turn request: one user prompt under a system instruction.
    pub fn single(prompt: &str, system: &str, max_tokens: u32, model: &str) -> Self {
        Self {
            model: model.to_string(),
            system: system.to_string(),
            messages: vec![ChatTurn::new("user", prompt)],
            max_tokens,
        }
    }

    /// Wire-level message list: the system instruction first (when non-empty),
    /// then the conversation in order.
    fn wire_messages(&self) -> Vec<WireMessage<'_>> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        if !self.system.is_empty() {
            messages.push(WireMessage {
                role: "system",
                content: &self.system,
            });
        }
        messages.extend(self.messages.iter().map(|turn| WireMessage {
            role: &turn.role,
            content: &turn.content,
        }));
        messages
    }
}

/// Text generation boundary. Stateless from the caller's point of view.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;

    /// Sends one prompt under one system instruction and returns the raw text.
    async fn generate(
        &self,
        prompt: &str,
        system: &str,
        max_output_tokens: u32,
        model_name: &str,
    ) -> Result<String, LlmError> {
        let request = CompletionRequest::single(prompt, system, max_output_tokens, model_name);
        self.complete(&request).await
    }
}

/// Image generation boundary. Returns the encoded image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<Bytes, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Text of the first choice; an absent message body reads as empty.
    pub fn text(&self) -> String {
        self.choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Settings for `OpenAiClient`. Model names for text calls travel with each request;
/// the image model and size are fixed per client.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub base_url: String,
    pub image_model: String,
    pub image_size: String,
}

/// The provider client shared by all services.
/// Wraps the chat-completions and image endpoints with retry logic.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiClient {
    pub fn new(settings: OpenAiSettings) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// POSTs a JSON body and decodes the JSON reply.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let url = self.endpoint(path);
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Provider call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.settings.api_key)
                .json(body)
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

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Provider API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let bytes = response.bytes().await?;
            return serde_json::from_slice(&bytes).map_err(LlmError::Parse);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: request.wire_messages(),
            temperature: TEMPERATURE,
            max_tokens: request.max_tokens,
        };

        let response: ChatCompletionResponse = self.post_json("chat/completions", &body).await?;

        if let Some(usage) = &response.usage {
            debug!(
                "Completion succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                request.model, usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(response.text())
    }
}

#[async_trait]
impl ImageGenerator for OpenAiClient {
    async fn generate_image(&self, prompt: &str) -> Result<Bytes, LlmError> {
        let body = ImageRequest {
            model: &self.settings.image_model,
            prompt,
            size: &self.settings.image_size,
            quality: "standard",
            n: 1,
        };

        let response: ImageResponse = self.post_json("images/generations", &body).await?;
        let url = response
            .data
            .into_iter()
            .find_map(|d| d.url)
            .ok_or(LlmError::EmptyContent)?;

        let image = self
            .client
            .get(&url)
            .timeout(std::time::Duration::from_secs(IMAGE_DOWNLOAD_TIMEOUT_SECS))
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        debug!("Downloaded generated image ({} bytes)", image.len());
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_messages_put_system_first() {
        let request = CompletionRequest::single("hello", "be terse", 64, "gpt-4o-mini");
        let wire = request.wire_messages();
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[0].content, "be terse");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[1].content, "hello");
    }

    #[test]
    fn test_wire_messages_skip_empty_system() {
        let request = CompletionRequest::single("hello", "", 64, "gpt-4o-mini");
        let wire = request.wire_messages();
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "user");
    }

    #[test]
    fn test_wire_messages_keep_conversation_order() {
        let request = CompletionRequest {
            model: "m".to_string(),
            system: "sys".to_string(),
            messages: vec![
                ChatTurn::new("user", "a"),
                ChatTurn::new("assistant", "b"),
                ChatTurn::new("user", "c"),
            ],
            max_tokens: 10,
        };
        let contents: Vec<&str> = request.wire_messages().iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["sys", "a", "b", "c"]);
    }

    #[test]
    fn test_completion_response_text_reads_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "hi"}}],
            "usage": {"prompt_tokens": 3, "completion_tokens": 1, "total_tokens": 4}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "hi");
    }

    #[test]
    fn test_completion_response_null_content_is_empty() {
        let json = r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let settings = OpenAiSettings {
            api_key: "k".to_string(),
            base_url: "http://localhost:9999/v1/".to_string(),
            image_model: "dall-e-3".to_string(),
            image_size: "1024x1024".to_string(),
        };
        let client = OpenAiClient::new(settings).unwrap();
        assert_eq!(
            client.endpoint("chat/completions"),
            "http://localhost:9999/v1/chat/completions"
        );
    }
}
