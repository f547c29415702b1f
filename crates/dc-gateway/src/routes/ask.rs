//! The ask endpoint: one support question through the full pipeline.

use std::sync::LazyLock;

use axum::Json;
use axum::extract::{Path, State};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use dc_llm::Role;
use dc_protocol::{
    Priority, Requester, SupportReply, TicketFields, TicketRecord, TicketStatus,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Fallback category when neither the recommendation nor the router
/// offered one.
const GENERAL_SUPPORT: &str = "General Support";

/// Characters of the question used as a tracking-ticket subject.
const SUBJECT_PREVIEW_CHARS: usize = 50;

// Ticket numbers like "IT-1234" (any 2-4 letter prefix).
static RE_TICKET_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]{2,4}-\d{1,6})\b").unwrap());

/// Request body for asking a support question.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// The user's question or message.
    pub question: String,
    /// Conversation session; history is kept per session id.
    #[serde(default = "default_session")]
    pub session_id: String,
    /// Who is asking. Without it no tickets are filed.
    #[serde(default)]
    pub requester: Option<Requester>,
}

fn default_session() -> String {
    "default".to_string()
}

/// Response body: the chain's reply plus any store side effects.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    /// Server-assigned id for this request.
    pub request_id: Uuid,
    /// The chain's reply envelope.
    pub reply: SupportReply,
    /// Ticket filed (or looked up) for this question.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketRecord>,
    /// The requester's open tickets (status checks without a number).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickets: Option<Vec<TicketRecord>>,
    /// Store failure note. The reply itself is never masked by a store
    /// failure; callers check this field to see whether filing worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket_error: Option<String>,
}

/// POST /api/v1/ask — process a support question end to end.
pub async fn ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> ApiResult<Json<AskResponse>> {
    let question = req.question.trim();
    if question.is_empty() {
        return Err(ApiError::BadRequest("question must not be empty".into()));
    }

    let request_id = Uuid::now_v7();
    tracing::info!(%request_id, session_id = %req.session_id, "processing question");

    {
        let mut memory = state.memory.write().await;
        memory.record(&req.session_id, Role::User, question);
    }

    let reply = state.chain.process(question).await?;

    if let SupportReply::Solution { solution, .. } = &reply {
        let mut memory = state.memory.write().await;
        memory.record(&req.session_id, Role::Assistant, solution.clone());
    }

    let mut ticket = None;
    let mut tickets = None;
    let mut ticket_error = None;

    match &reply {
        SupportReply::Solution {
            solution, category, ..
        } => {
            // Solved questions still get a ticket for tracking.
            if let Some(requester) = &req.requester {
                let fields =
                    tracking_ticket_fields(question, solution, category.as_deref(), requester);
                (ticket, ticket_error) = file_ticket(&state, fields).await;
            }
        }
        SupportReply::TicketNeeded { recommendation, .. } if recommendation.should_create => {
            if let Some(requester) = &req.requester {
                let fields = TicketFields {
                    subject: recommendation.subject.clone(),
                    description: question.to_string(),
                    category: recommendation.category.clone(),
                    priority: recommendation.priority,
                    requester_email: requester.email.clone(),
                    requester_name: requester.name.clone(),
                    status: TicketStatus::New,
                };
                (ticket, ticket_error) = file_ticket(&state, fields).await;
            }
        }
        SupportReply::TicketNeeded { .. } => {}
        SupportReply::StatusCheck { ticket_number } => {
            let number = ticket_number
                .clone()
                .or_else(|| extract_ticket_number(question));
            match number {
                Some(number) => match state.tickets.get_ticket(&number).await {
                    Ok(Some(record)) => ticket = Some(record),
                    Ok(None) => {
                        ticket_error = Some(format!("ticket '{number}' not found"));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "ticket lookup failed");
                        ticket_error = Some(err.to_string());
                    }
                },
                None => {
                    if let Some(requester) = &req.requester {
                        match state.tickets.get_user_tickets(&requester.email).await {
                            Ok(records) => tickets = Some(records),
                            Err(err) => {
                                tracing::warn!(error = %err, "ticket listing failed");
                                ticket_error = Some(err.to_string());
                            }
                        }
                    }
                }
            }
        }
        SupportReply::Command { .. } => {}
    }

    Ok(Json(AskResponse {
        request_id,
        reply,
        ticket,
        tickets,
        ticket_error,
    }))
}

/// DELETE /api/v1/sessions/{id} — forget a conversation.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<Value> {
    let mut memory = state.memory.write().await;
    memory.clear(&session_id);
    Json(json!({ "session_id": session_id, "cleared": true }))
}

/// Fields for the Low-priority tracking ticket behind a solved question.
fn tracking_ticket_fields(
    question: &str,
    solution: &str,
    category: Option<&str>,
    requester: &Requester,
) -> TicketFields {
    TicketFields {
        subject: question.chars().take(SUBJECT_PREVIEW_CHARS).collect(),
        description: format!("{question}\n\n--- Bot Response ---\n{solution}"),
        category: category.unwrap_or(GENERAL_SUPPORT).to_string(),
        priority: Priority::Low,
        requester_email: requester.email.clone(),
        requester_name: requester.name.clone(),
        status: TicketStatus::BotAssisted,
    }
}

/// File a ticket, folding store failures into the response rather than
/// failing the request.
async fn file_ticket(
    state: &AppState,
    fields: TicketFields,
) -> (Option<TicketRecord>, Option<String>) {
    match state.tickets.create_ticket(&fields).await {
        Ok(record) => {
            tracing::info!(ticket_number = %record.ticket_number, "ticket filed");
            (Some(record), None)
        }
        Err(err) => {
            tracing::warn!(error = %err, "ticket creation failed");
            (None, Some(err.to_string()))
        }
    }
}

/// Pull a ticket number out of free text, uppercased.
fn extract_ticket_number(text: &str) -> Option<String> {
    RE_TICKET_NUMBER
        .captures(text)
        .map(|caps| caps[1].to_uppercase())
}
