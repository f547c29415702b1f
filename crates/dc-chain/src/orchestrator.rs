//! The support chain: route once, run exactly one handler.

use std::sync::Arc;

use dc_knowledge::KnowledgeSearch;
use dc_llm::ChatModel;
use dc_protocol::{IntentKind, SupportReply};

use crate::error::ChainResult;
use crate::quick_fix::QuickFixHandler;
use crate::router::SupportRouter;
use crate::ticket::TicketHandler;

/// Context injected when a troubleshooting classification is folded
/// into the ticket path.
const TROUBLESHOOTING_CONTEXT: &str = "Complex issue requiring troubleshooting";

/// Router plus handlers behind one `process` call.
///
/// Every branch ends in one of the four [`SupportReply`] shapes. There
/// is no interactive troubleshooting workflow; questions classified
/// that way become ticket recommendations with explanatory context.
pub struct SupportChain {
    router: SupportRouter,
    quick_fix: QuickFixHandler,
    tickets: TicketHandler,
}

impl SupportChain {
    /// Wire the chain onto a model endpoint and a retrieval backend.
    pub fn new(model: Arc<dyn ChatModel>, search: Arc<dyn KnowledgeSearch>) -> Self {
        Self {
            router: SupportRouter::new(model.clone()),
            quick_fix: QuickFixHandler::new(model.clone(), search),
            tickets: TicketHandler::new(model),
        }
    }

    /// Process one question end to end.
    pub async fn process(&self, question: &str) -> ChainResult<SupportReply> {
        let intent = self.router.route(question).await?;
        tracing::info!(
            intent = %intent.intent_type,
            confidence = intent.confidence,
            "dispatching support question"
        );

        match intent.intent_type {
            IntentKind::QuickFix => {
                let response = self
                    .quick_fix
                    .handle(question, intent.category.as_deref())
                    .await?;
                Ok(SupportReply::Solution {
                    solution: response.solution,
                    confidence: response.confidence,
                    offer_ticket: response.offer_ticket,
                    category: intent.category,
                    priority: intent.priority,
                })
            }
            IntentKind::NeedsTicket => {
                let recommendation = self.tickets.recommend(question, None).await?;
                Ok(SupportReply::TicketNeeded {
                    recommendation,
                    reasoning: intent.reasoning,
                })
            }
            IntentKind::NeedsTroubleshooting => {
                let recommendation = self
                    .tickets
                    .recommend(question, Some(TROUBLESHOOTING_CONTEXT))
                    .await?;
                Ok(SupportReply::TicketNeeded {
                    recommendation,
                    reasoning: intent.reasoning,
                })
            }
            IntentKind::StatusCheck => Ok(SupportReply::StatusCheck {
                ticket_number: intent.ticket_number,
            }),
            IntentKind::Command => Ok(SupportReply::Command { intent }),
        }
    }
}
