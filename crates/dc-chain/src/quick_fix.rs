//! Quick-fix stage: single-shot solutions grounded on the knowledge base.

use std::sync::Arc;

use dc_knowledge::{GENERAL_GUIDANCE, KnowledgeSearch};
use dc_llm::{ChatMessage, ChatModel, CompletionOptions};
use dc_protocol::QuickFixResponse;

use crate::error::ChainResult;
use crate::prompt;

const GENERATION_TEMPERATURE: f64 = 0.3;

/// At most this many knowledge base blocks go into the prompt.
const MAX_KB_MATCHES: usize = 2;

/// Answers common issues in one model call, with retrieved knowledge
/// base context in the system prompt.
pub struct QuickFixHandler {
    model: Arc<dyn ChatModel>,
    search: Arc<dyn KnowledgeSearch>,
}

impl QuickFixHandler {
    pub fn new(model: Arc<dyn ChatModel>, search: Arc<dyn KnowledgeSearch>) -> Self {
        Self { model, search }
    }

    /// Generate a direct solution for `question`.
    ///
    /// `category` is the router's hint; it is logged but the retrieval
    /// runs on the question text alone.
    pub async fn handle(
        &self,
        question: &str,
        category: Option<&str>,
    ) -> ChainResult<QuickFixResponse> {
        let context = self.grounding_context(question).await;
        tracing::debug!(
            category = category.unwrap_or("-"),
            backend = self.search.backend(),
            "generating quick fix"
        );

        let system = prompt::QUICK_FIX_SYSTEM.render(&[("kb_context", context.as_str())]);
        let messages = [ChatMessage::system(system), ChatMessage::user(question)];
        let raw = self
            .model
            .complete(
                &messages,
                CompletionOptions {
                    temperature: GENERATION_TEMPERATURE,
                },
            )
            .await?;
        Ok(QuickFixResponse::decode(&raw)?)
    }

    /// Matching blocks joined blank-line separated, or the fixed
    /// general-guidance line when nothing matches.
    async fn grounding_context(&self, question: &str) -> String {
        let blocks = self.search.search(question, MAX_KB_MATCHES).await;
        if blocks.is_empty() {
            GENERAL_GUIDANCE.to_string()
        } else {
            blocks.join("\n\n")
        }
    }
}
