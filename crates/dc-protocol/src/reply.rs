use serde::{Deserialize, Serialize};

use crate::intent::{Priority, SupportIntent};
use crate::ticket::TicketRecommendation;

/// Envelope every processed question is shaped into, regardless of branch.
///
/// Serialized with a `type` tag so downstream surfaces (REST, chat bots)
/// can switch on one field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SupportReply {
    /// Direct answer from the quick-fix branch.
    Solution {
        solution: String,
        confidence: f64,
        offer_ticket: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        priority: Option<Priority>,
    },
    /// The issue warrants a ticket; parameters are recommended, not filed.
    TicketNeeded {
        recommendation: TicketRecommendation,
        reasoning: String,
    },
    /// User asked about an existing ticket.
    StatusCheck {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ticket_number: Option<String>,
    },
    /// Bot command passed through for the surface to interpret.
    Command { intent: SupportIntent },
}

impl SupportReply {
    /// Wire name of the variant (same spelling as the serialized tag).
    pub fn kind(&self) -> &'static str {
        match self {
            SupportReply::Solution { .. } => "solution",
            SupportReply::TicketNeeded { .. } => "ticket_needed",
            SupportReply::StatusCheck { .. } => "status_check",
            SupportReply::Command { .. } => "command",
        }
    }
}
