//! Knowledge base error types.

use thiserror::Error;

/// Errors that can occur while loading a knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience alias for knowledge base results.
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;
