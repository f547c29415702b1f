use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::intent::Priority;

/// Ticket parameters recommended by the ticket model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRecommendation {
    /// Whether a ticket should actually be opened for this issue.
    pub should_create: bool,
    /// One-line summary (at most 100 characters, the store's field limit).
    pub subject: String,
    /// Full issue description for the technician.
    pub description: String,
    /// IT category label (e.g., "Hardware Issue").
    pub category: String,
    /// Priority per the triage guidelines.
    pub priority: Priority,
    /// Why the model chose these parameters.
    pub reasoning: String,
}

/// Lifecycle status of a ticket in the store.
///
/// Wire spellings match the store's choice field, including the
/// two-word labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    #[default]
    New,
    #[serde(rename = "Bot Assisted")]
    BotAssisted,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::New => "New",
            TicketStatus::BotAssisted => "Bot Assisted",
            TicketStatus::InProgress => "In Progress",
            TicketStatus::Resolved => "Resolved",
            TicketStatus::Closed => "Closed",
        }
    }

    /// Case-insensitive parse of a status label.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "new" => Some(TicketStatus::New),
            "bot assisted" => Some(TicketStatus::BotAssisted),
            "in progress" => Some(TicketStatus::InProgress),
            "resolved" => Some(TicketStatus::Resolved),
            "closed" => Some(TicketStatus::Closed),
            _ => None,
        }
    }

    /// Whether the ticket still counts toward the open queue.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            TicketStatus::New | TicketStatus::BotAssisted | TicketStatus::InProgress
        )
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who a ticket (or question) is being filed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requester {
    pub email: String,
    pub name: String,
}

/// Fields written to the store when opening a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketFields {
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub requester_email: String,
    pub requester_name: String,
    /// Initial status; "New" for real tickets, "Bot Assisted" for
    /// tracking records behind an automated solution.
    #[serde(default)]
    pub status: TicketStatus,
}

/// A ticket as read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRecord {
    /// Human-facing ticket number (e.g., "IT-0042").
    pub ticket_number: String,
    /// Store-internal record ID.
    pub record_id: i64,
    pub subject: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: String,
    /// When the ticket was submitted (absent for stores that don't track it).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted: Option<DateTime<Utc>>,
    /// Resolution notes, once the ticket is resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// Deep link into the store's UI for this record.
    pub url: String,
}

/// Aggregate queue statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketStats {
    /// Tickets currently in an open status.
    pub total_open: u64,
    /// Tickets resolved since midnight UTC.
    pub total_resolved_today: u64,
    /// Open tickets broken down by priority.
    pub by_priority: HashMap<Priority, u64>,
}
