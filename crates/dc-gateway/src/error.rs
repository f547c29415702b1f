//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use dc_chain::ChainError;
use dc_llm::LlmError;
use dc_tickets::TicketStoreError;

/// API error type that converts to proper HTTP responses.
///
/// Chain failures map onto upstream-flavored statuses: the model is a
/// dependency of this service, so its timeouts and garbage output are
/// 504/502, not 500.
#[derive(Debug, thiserror::Error)]
#[allow(dead_code)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error("ticket store: {0}")]
    Tickets(#[from] TicketStoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Chain(ChainError::Model(LlmError::Timeout { .. })) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Chain(ChainError::Model(LlmError::RateLimited { .. })) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            ApiError::Chain(_) => StatusCode::BAD_GATEWAY,
            ApiError::Tickets(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;
