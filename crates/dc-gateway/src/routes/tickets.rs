//! Ticket endpoints backed by the external store.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use dc_protocol::{
    Priority, Requester, SUBJECT_MAX_CHARS, TicketFields, TicketRecord, TicketStatus,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for direct ticket creation.
#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub subject: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    pub requester: Requester,
}

/// POST /api/v1/tickets — open a ticket without going through the chain.
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(req): Json<CreateTicketRequest>,
) -> ApiResult<Json<TicketRecord>> {
    let subject = req.subject.trim();
    if subject.is_empty() {
        return Err(ApiError::BadRequest("subject must not be empty".into()));
    }
    let len = subject.chars().count();
    if len > SUBJECT_MAX_CHARS {
        return Err(ApiError::BadRequest(format!(
            "subject is {len} characters (limit {SUBJECT_MAX_CHARS})"
        )));
    }

    let fields = TicketFields {
        subject: subject.to_string(),
        description: req.description,
        category: req.category,
        priority: req.priority,
        requester_email: req.requester.email,
        requester_name: req.requester.name,
        status: TicketStatus::New,
    };

    let record = state.tickets.create_ticket(&fields).await?;
    tracing::info!(ticket_number = %record.ticket_number, "ticket created");
    Ok(Json(record))
}

/// Query string for listing a requester's tickets.
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    pub email: String,
}

/// GET /api/v1/tickets?email=… — the requester's open tickets.
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<ListTicketsQuery>,
) -> ApiResult<Json<Vec<TicketRecord>>> {
    let records = state.tickets.get_user_tickets(&query.email).await?;
    Ok(Json(records))
}

/// GET /api/v1/tickets/{number} — single ticket lookup.
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(ticket_number): Path<String>,
) -> ApiResult<Json<TicketRecord>> {
    let record = state
        .tickets
        .get_ticket(&ticket_number)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("ticket '{ticket_number}' not found")))?;
    Ok(Json(record))
}
