//! Chat-completion access for DeskChain.
//!
//! Wraps any OpenAI-compatible `/chat/completions` endpoint behind the
//! `ChatModel` trait so the support chain never talks HTTP directly.
//! Ships a scripted mock for tests.

pub mod client;
pub mod error;
pub mod mock;
pub mod model;

// Re-export key types for convenience
pub use client::{LlmConfig, OpenAiChatClient};
pub use error::{LlmError, LlmResult};
pub use mock::{MockChatModel, RecordedRequest};
pub use model::{ChatMessage, ChatModel, CompletionOptions, Role};
