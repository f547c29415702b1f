//! Shared test harness for E2E integration tests.
//!
//! Wires the real gateway router onto a scripted chat model and an
//! in-memory ticket store, exercising real code paths across all crate
//! boundaries.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use tower::ServiceExt;

use dc_chain::{ConversationTurn, SupportChain};
use dc_gateway::routes::build_router;
use dc_gateway::state::AppState;
use dc_knowledge::KeywordSearch;
use dc_llm::MockChatModel;
use dc_protocol::{Priority, TicketRecord, TicketStatus};
use dc_tickets::MockTicketStore;

/// Router verdict for a question the knowledge base can answer.
pub const QUICK_FIX_INTENT: &str = r#"{"intent_type": "quick_fix", "confidence": 0.92, "reasoning": "matches a known fix", "category": "VPN Access"}"#;

/// Quick-fix handler payload with a concrete solution.
pub const FIX: &str = r#"{"solution": "Disconnect the VPN client, run ipconfig /flushdns, then reconnect.", "solved": true, "confidence": 0.9, "offer_ticket": false}"#;

/// Router verdict for a request IT has to action.
pub const TICKET_INTENT: &str = r#"{"intent_type": "needs_ticket", "confidence": 0.85, "reasoning": "software install request"}"#;

/// Ticket handler payload recommending a new ticket.
pub const RECOMMENDATION: &str = r#"{"should_create": true, "subject": "Install AutoCAD 2026", "description": "User needs AutoCAD with a floating license.", "category": "Software Installation", "priority": "Medium", "reasoning": "Requires a license purchase"}"#;

/// Router verdict for an issue that needs hands-on diagnosis.
pub const TROUBLESHOOT_INTENT: &str = r#"{"intent_type": "needs_troubleshooting", "confidence": 0.8, "reasoning": "intermittent failure, needs diagnosis"}"#;

/// Router verdict naming a ticket number to check.
pub const STATUS_INTENT: &str = r#"{"intent_type": "status_check", "confidence": 0.95, "reasoning": "asks about an existing ticket", "ticket_number": "IT-1234"}"#;

/// End-to-end test harness wiring the gateway router to test doubles.
pub struct TestHarness {
    /// Gateway application state (shared conversation memory included).
    pub state: AppState,
    /// Axum router for HTTP requests via `tower::oneshot`.
    pub router: Router,
    /// Scripted chat model behind the support chain.
    pub model: Arc<MockChatModel>,
    /// In-memory ticket store standing in for QuickBase.
    pub store: Arc<MockTicketStore>,
}

impl TestHarness {
    /// Create a harness whose chat model is pre-loaded with `replies`.
    pub fn with_replies(replies: &[&str]) -> Self {
        let model = Arc::new(MockChatModel::with_replies(replies));
        let store = Arc::new(MockTicketStore::new());
        let chain = Arc::new(SupportChain::new(
            model.clone(),
            Arc::new(KeywordSearch::builtin()),
        ));
        let state = AppState::new(chain, store.clone());
        let router = build_router(state.clone());

        Self {
            state,
            router,
            model,
            store,
        }
    }

    /// Create a harness with no scripted replies (for ticket endpoints
    /// that never touch the model).
    pub fn empty() -> Self {
        Self::with_replies(&[])
    }

    /// Create a harness with an explicit conversation-memory cap.
    pub fn with_memory_turns(replies: &[&str], max_turns: usize) -> Self {
        let model = Arc::new(MockChatModel::with_replies(replies));
        let store = Arc::new(MockTicketStore::new());
        let chain = Arc::new(SupportChain::new(
            model.clone(),
            Arc::new(KeywordSearch::builtin()),
        ));
        let state = AppState::with_memory_turns(chain, store.clone(), max_turns);
        let router = build_router(state.clone());

        Self {
            state,
            router,
            model,
            store,
        }
    }

    /// Ask a question anonymously in the default session (POST /api/v1/ask).
    /// Returns (HTTP status code, response JSON body).
    pub async fn ask(&self, question: &str) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "question": question });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/api/v1/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Ask a question with a requester attached, so tickets can be filed.
    pub async fn ask_as(
        &self,
        question: &str,
        email: &str,
        name: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({
            "question": question,
            "requester": { "email": email, "name": name },
        });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/api/v1/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Ask a question in a named conversation session.
    pub async fn ask_in_session(
        &self,
        question: &str,
        session_id: &str,
    ) -> (StatusCode, serde_json::Value) {
        let body = serde_json::json!({ "question": question, "session_id": session_id });

        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/api/v1/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Open a ticket directly (POST /api/v1/tickets).
    pub async fn create_ticket(&self, body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::post("/api/v1/tickets")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Look up one ticket (GET /api/v1/tickets/{number}).
    pub async fn get_ticket(&self, number: &str) -> (StatusCode, serde_json::Value) {
        let url = format!("/api/v1/tickets/{number}");
        let response = self
            .router
            .clone()
            .oneshot(Request::get(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// List a requester's open tickets (GET /api/v1/tickets?email=…).
    pub async fn list_tickets(&self, email: &str) -> (StatusCode, serde_json::Value) {
        let url = format!("/api/v1/tickets?email={email}");
        let response = self
            .router
            .clone()
            .oneshot(Request::get(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Queue statistics (GET /api/v1/stats).
    pub async fn stats(&self) -> (StatusCode, serde_json::Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::get("/api/v1/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Forget a conversation (DELETE /api/v1/sessions/{id}).
    pub async fn clear_session(&self, session_id: &str) -> (StatusCode, serde_json::Value) {
        let url = format!("/api/v1/sessions/{session_id}");
        let response = self
            .router
            .clone()
            .oneshot(Request::delete(&url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        (status, json)
    }

    /// Conversation history for a session, read straight from state.
    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.state.memory.read().await.history(session_id)
    }
}

/// An open ticket as the store would return it.
pub fn open_ticket(number: &str, record_id: i64) -> TicketRecord {
    TicketRecord {
        ticket_number: number.to_string(),
        record_id,
        subject: "Laptop fan at full speed".into(),
        status: TicketStatus::InProgress,
        priority: Priority::Medium,
        category: "Hardware Issue".into(),
        submitted: Some(Utc::now()),
        resolution: None,
        url: format!("https://mock.quickbase.local/db/tickets?a=dr&rid={record_id}"),
    }
}

/// A resolved ticket, invisible to open-ticket listings.
pub fn resolved_ticket(number: &str, record_id: i64) -> TicketRecord {
    TicketRecord {
        status: TicketStatus::Resolved,
        resolution: Some("Replaced the fan.".into()),
        ..open_ticket(number, record_id)
    }
}
