use serde::{Deserialize, Serialize};

/// Which pipeline branch a classified question should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    /// Common issue with a known solution (password, VPN, Teams, printer).
    QuickFix,
    /// Complex issue that needs diagnosis before it can be fixed.
    NeedsTroubleshooting,
    /// Hardware, licenses, admin access, new user setup.
    NeedsTicket,
    /// User asking about an existing ticket.
    StatusCheck,
    /// Bot command like /help, /ticket, /status.
    Command,
}

impl IntentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentKind::QuickFix => "quick_fix",
            IntentKind::NeedsTroubleshooting => "needs_troubleshooting",
            IntentKind::NeedsTicket => "needs_ticket",
            IntentKind::StatusCheck => "status_check",
            IntentKind::Command => "command",
        }
    }
}

impl std::fmt::Display for IntentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ticket priority as stored in the ticket system.
///
/// Serialized capitalized ("Low", "Medium", ...) to match the store's
/// choice-field spellings exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Critical => "Critical",
        }
    }

    /// Case-insensitive parse of a priority label.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification produced by the routing model for one user question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportIntent {
    /// Which branch to dispatch to.
    pub intent_type: IntentKind,
    /// Model confidence in the classification (0.0 - 1.0).
    pub confidence: f64,
    /// Short model-provided justification for the choice.
    pub reasoning: String,
    /// IT category hint (e.g., "VPN Access"), if the model inferred one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Suggested priority, if the model inferred one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Ticket number extracted from the question (status checks only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_number: Option<String>,
}
