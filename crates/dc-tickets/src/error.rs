//! Ticket store error types.

use thiserror::Error;

/// Errors that can occur during ticket store operations.
#[derive(Debug, Error)]
pub enum TicketStoreError {
    #[error("store rejected credentials (HTTP {status})")]
    Auth { status: u16 },

    #[error("store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed store payload: {0}")]
    Payload(String),
}

/// Convenience alias for ticket store results.
pub type TicketResult<T> = Result<T, TicketStoreError>;
