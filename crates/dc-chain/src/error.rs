//! Pipeline error types.

use thiserror::Error;

use dc_llm::LlmError;
use dc_protocol::DecodeError;

/// Errors from routing and handling.
///
/// Decode and model failures propagate unmodified; the chain retries
/// nothing and substitutes no defaults.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Model(#[from] LlmError),
}

/// Convenience alias for chain results.
pub type ChainResult<T> = Result<T, ChainError>;
