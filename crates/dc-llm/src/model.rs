//! Chat-completion abstraction the rest of the system depends on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmResult;

/// Message author role, serialized with the OpenAI wire spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single message in a chat completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call inference options. Each pipeline stage picks its own
/// temperature; everything else (model, endpoint) is client config.
#[derive(Debug, Clone, Copy)]
pub struct CompletionOptions {
    pub temperature: f64,
}

/// Abstraction over a chat-completion endpoint.
///
/// The router and handlers depend on this trait rather than the HTTP
/// client, so tests can script replies without a network.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion and return the assistant's raw text.
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> LlmResult<String>;

    /// Model identifier for logs.
    fn model_name(&self) -> &str;
}
