use serde::{Deserialize, Serialize};

/// Structured answer from the quick-fix model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickFixResponse {
    /// Step-by-step solution text shown to the user.
    pub solution: String,
    /// Whether the model believes the solution resolves the issue outright.
    pub solved: bool,
    /// Model confidence in the solution (0.0 - 1.0).
    pub confidence: f64,
    /// Whether to offer opening a ticket as a fallback.
    #[serde(default)]
    pub offer_ticket: bool,
}
