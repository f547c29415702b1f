//! Queue statistics endpoint.

use axum::Json;
use axum::extract::State;

use dc_protocol::TicketStats;

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/v1/stats — open/resolved-today/by-priority counts.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<TicketStats>> {
    let stats = state.tickets.get_statistics().await?;
    Ok(Json(stats))
}
