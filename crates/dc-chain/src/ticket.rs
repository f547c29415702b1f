//! Ticket stage: structured ticket parameter recommendations.

use std::sync::Arc;

use dc_llm::{ChatMessage, ChatModel, CompletionOptions};
use dc_protocol::TicketRecommendation;

use crate::error::ChainResult;
use crate::prompt;

const RECOMMENDATION_TEMPERATURE: f64 = 0.2;

/// Stand-in context when the caller has none to offer.
const NO_CONTEXT: &str = "No additional context";

/// Recommends ticket parameters. Never files the ticket itself; that
/// stays with the caller and the ticket store.
pub struct TicketHandler {
    model: Arc<dyn ChatModel>,
}

impl TicketHandler {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Recommend ticket parameters for `question`.
    pub async fn recommend(
        &self,
        question: &str,
        context: Option<&str>,
    ) -> ChainResult<TicketRecommendation> {
        let user = prompt::TICKET_USER.render(&[
            ("question", question),
            ("context", context.unwrap_or(NO_CONTEXT)),
        ]);
        let messages = [
            ChatMessage::system(prompt::TICKET_SYSTEM.text()),
            ChatMessage::user(user),
        ];
        let raw = self
            .model
            .complete(
                &messages,
                CompletionOptions {
                    temperature: RECOMMENDATION_TEMPERATURE,
                },
            )
            .await?;
        Ok(TicketRecommendation::decode(&raw)?)
    }
}
