//! Model endpoint error types.

use thiserror::Error;

/// Errors from a chat-completion endpoint.
///
/// Auth, rate-limit and timeout failures are split out because callers
/// map them to different HTTP statuses at the API boundary.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model endpoint rejected credentials (HTTP {status})")]
    Auth { status: u16 },

    #[error("model endpoint rate limited the request")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("model call timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("model endpoint returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed completion payload: {0}")]
    InvalidResponse(String),
}

/// Convenience alias for model call results.
pub type LlmResult<T> = Result<T, LlmError>;
