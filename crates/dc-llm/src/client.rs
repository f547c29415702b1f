//! HTTP client for OpenAI-compatible chat-completion endpoints.
//!
//! Targets the `/chat/completions` route of whatever base URL is
//! configured, so the same client covers OpenAI, Azure-style proxies and
//! self-hosted gateways. Upstream failures are classified into
//! [`LlmError`](crate::error::LlmError) variants the API boundary can map
//! onto distinct HTTP statuses.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::{LlmError, LlmResult};
use crate::model::{ChatMessage, ChatModel, CompletionOptions};

/// Configuration for an OpenAI-compatible endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// API base URL, up to but not including `/chat/completions`.
    pub endpoint: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model to request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl LlmConfig {
    /// Build from `GPT5_*` environment variables. Endpoint and key are
    /// required; model and timeout fall back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let endpoint = std::env::var("GPT5_ENDPOINT").context("GPT5_ENDPOINT is not set")?;
        let api_key = std::env::var("GPT5_API_KEY").context("GPT5_API_KEY is not set")?;
        let model = std::env::var("GPT5_MODEL").unwrap_or_else(|_| default_model());
        Ok(Self {
            endpoint,
            api_key,
            model,
            timeout_secs: default_timeout_secs(),
        })
    }
}

/// Chat completions request body.
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f64,
}

/// Chat completions response body (only fields we need).
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat endpoint.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiChatClient {
    pub fn new(config: LlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self { client, config }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> LlmResult<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        );

        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: options.temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    LlmError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LlmError::Auth {
                status: status.as_u16(),
            });
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LlmError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "model endpoint returned error");
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("completion has no choices".into()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
