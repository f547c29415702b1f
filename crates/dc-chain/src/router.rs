//! Routing stage: classify a question into a support intent.

use std::sync::Arc;

use dc_llm::{ChatMessage, ChatModel, CompletionOptions};
use dc_protocol::SupportIntent;

use crate::error::ChainResult;
use crate::prompt;

/// Low temp for consistent routing.
const ROUTING_TEMPERATURE: f64 = 0.1;

/// First stage of every request: one classification call, decoded
/// strictly into a [`SupportIntent`].
pub struct SupportRouter {
    model: Arc<dyn ChatModel>,
}

impl SupportRouter {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Classify `question`.
    ///
    /// Output that does not decode into the intent schema is an error,
    /// never a guessed classification.
    pub async fn route(&self, question: &str) -> ChainResult<SupportIntent> {
        let messages = [
            ChatMessage::system(prompt::ROUTER_SYSTEM.text()),
            ChatMessage::user(question),
        ];
        let raw = self
            .model
            .complete(
                &messages,
                CompletionOptions {
                    temperature: ROUTING_TEMPERATURE,
                },
            )
            .await?;

        let intent = SupportIntent::decode(&raw)?;
        tracing::debug!(
            intent = %intent.intent_type,
            confidence = intent.confidence,
            "question classified"
        );
        Ok(intent)
    }
}
