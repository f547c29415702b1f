//! Ticket store abstraction.

use async_trait::async_trait;

use dc_protocol::{TicketFields, TicketRecord, TicketStats};

use crate::error::TicketResult;

/// The external ticket system, seen through the four operations the
/// gateway needs. Lookup misses are `Ok(None)` / empty vecs, not errors;
/// errors mean the store itself misbehaved.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Open a new ticket and return it as the store recorded it.
    async fn create_ticket(&self, fields: &TicketFields) -> TicketResult<TicketRecord>;

    /// Look up one ticket by its human-facing number (e.g., "IT-0042").
    async fn get_ticket(&self, ticket_number: &str) -> TicketResult<Option<TicketRecord>>;

    /// All open tickets filed by `email`, newest first.
    async fn get_user_tickets(&self, email: &str) -> TicketResult<Vec<TicketRecord>>;

    /// Aggregate queue statistics.
    async fn get_statistics(&self) -> TicketResult<TicketStats>;
}
