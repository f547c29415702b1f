//! E2E tests for the full ask pipeline:
//! REST API → routing → handler → reply envelope → store side effects → memory.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use dc_llm::Role;
use dc_protocol::{Priority, TicketStatus};
use helpers::{
    FIX, QUICK_FIX_INTENT, RECOMMENDATION, STATUS_INTENT, TICKET_INTENT, TROUBLESHOOT_INTENT,
    TestHarness, open_ticket,
};

/// Full pipeline for a solvable question: routed as quick_fix, grounded on
/// the VPN knowledge base entry, answered, tracked, and remembered.
#[tokio::test]
async fn e2e_quick_fix_full_pipeline() {
    let h = TestHarness::with_replies(&[QUICK_FIX_INTENT, FIX]);

    // 1. Ask via the REST API, with a requester so a ticket can be filed
    let (status, json) = h
        .ask_as(
            "I can't connect to the VPN from home",
            "pat@corp.example",
            "Pat Kim",
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // 2. The reply envelope is the solution shape
    assert_eq!(json["reply"]["type"], "solution");
    assert_eq!(
        json["reply"]["solution"],
        "Disconnect the VPN client, run ipconfig /flushdns, then reconnect."
    );

    // 3. The model saw the routing call, then the generation call
    let requests = h.model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].temperature, 0.1);
    assert_eq!(requests[1].temperature, 0.3);

    // 4. Retrieval grounded the generation prompt on the VPN entry
    assert!(requests[1].messages[0].content.contains("### VPN_ISSUES\n"));

    // 5. A Low-priority tracking ticket was filed for the solved question
    assert_eq!(json["ticket"]["ticket_number"], "IT-0001");
    assert_eq!(json["ticket"]["status"], "Bot Assisted");
    let created = h.store.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].priority, Priority::Low);
    assert!(created[0].description.contains("--- Bot Response ---"));

    // 6. Both sides of the exchange landed in conversation memory
    let history = h.history("default").await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[1].role, Role::Assistant);
}

/// Full pipeline for a request IT must action: the recommendation comes
/// back in the reply and a New ticket is filed from it.
#[tokio::test]
async fn e2e_ticket_recommendation_full_pipeline() {
    let h = TestHarness::with_replies(&[TICKET_INTENT, RECOMMENDATION]);

    let (status, json) = h
        .ask_as(
            "I need AutoCAD 2026 installed on my workstation",
            "sam@corp.example",
            "Sam Lee",
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["reply"]["type"], "ticket_needed");
    assert_eq!(
        json["reply"]["recommendation"]["subject"],
        "Install AutoCAD 2026"
    );
    assert_eq!(json["reply"]["reasoning"], "software install request");

    // The recommendation call runs at the ticket temperature with the
    // no-context sentinel.
    let requests = h.model.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].temperature, 0.2);
    assert!(
        requests[1].messages[1]
            .content
            .contains("Context: No additional context")
    );

    // Filed as New with the recommended parameters; the description is
    // the user's own words.
    assert_eq!(json["ticket"]["status"], "New");
    let created = h.store.created();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].subject, "Install AutoCAD 2026");
    assert_eq!(created[0].priority, Priority::Medium);
    assert_eq!(created[0].status, TicketStatus::New);
    assert_eq!(
        created[0].description,
        "I need AutoCAD 2026 installed on my workstation"
    );
}

/// A troubleshooting classification folds into the ticket path, with the
/// explanatory context injected into the recommendation prompt.
#[tokio::test]
async fn e2e_troubleshooting_folds_into_ticket_path() {
    let h = TestHarness::with_replies(&[TROUBLESHOOT_INTENT, RECOMMENDATION]);

    let (status, json) = h
        .ask("Outlook crashes whenever I open a meeting invite")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"]["type"], "ticket_needed");

    let requests = h.model.requests();
    assert_eq!(requests.len(), 2);
    assert!(
        requests[1].messages[1]
            .content
            .contains("Context: Complex issue requiring troubleshooting")
    );

    // Anonymous question: recommended, but nothing filed.
    assert!(h.store.created().is_empty());
}

/// Status checks are routing-only: neither handler runs, and the number
/// resolves against the store.
#[tokio::test]
async fn e2e_status_check_is_routing_only() {
    let h = TestHarness::with_replies(&[STATUS_INTENT]);
    h.store.seed("pat@corp.example", open_ticket("IT-1234", 1234));

    let (status, json) = h.ask("What's the status of IT-1234?").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["reply"]["type"], "status_check");
    assert_eq!(json["reply"]["ticket_number"], "IT-1234");
    assert_eq!(json["ticket"]["ticket_number"], "IT-1234");
    assert_eq!(json["ticket"]["status"], "In Progress");

    // Only the routing call happened.
    assert_eq!(h.model.requests().len(), 1);
}

/// Bot commands pass the routing verdict through untouched.
#[tokio::test]
async fn e2e_command_passes_intent_through() {
    let command_intent =
        r#"{"intent_type": "command", "confidence": 1.0, "reasoning": "bot command"}"#;
    let h = TestHarness::with_replies(&[command_intent]);

    let (status, json) = h.ask("/help").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["reply"]["type"], "command");
    assert_eq!(json["reply"]["intent"]["intent_type"], "command");
    assert_eq!(h.model.requests().len(), 1);
    assert!(h.store.created().is_empty());
}

/// Questions hitting two knowledge base families get both blocks in the
/// generation prompt.
#[tokio::test]
async fn e2e_retrieval_grounds_on_two_entries() {
    let h = TestHarness::with_replies(&[QUICK_FIX_INTENT, FIX]);

    let (status, _) = h.ask("My password stopped working on the VPN").await;
    assert_eq!(status, StatusCode::OK);

    let requests = h.model.requests();
    let system = &requests[1].messages[0].content;
    assert!(system.contains("### PASSWORD_RESET\n"));
    assert!(system.contains("### VPN_ISSUES\n"));
}

/// With no knowledge base hit, the prompt carries the general-guidance
/// line instead of retrieval blocks.
#[tokio::test]
async fn e2e_no_retrieval_match_falls_back_to_general_guidance() {
    let h = TestHarness::with_replies(&[QUICK_FIX_INTENT, FIX]);

    let (status, _) = h.ask("My standing desk is stuck at the top").await;
    assert_eq!(status, StatusCode::OK);

    let requests = h.model.requests();
    let system = &requests[1].messages[0].content;
    assert!(system.contains("No specific KB entry found"));
    assert!(!system.contains("###"));
}

/// Every request gets its own server-assigned id.
#[tokio::test]
async fn e2e_request_ids_are_unique() {
    let h = TestHarness::with_replies(&[QUICK_FIX_INTENT, FIX, QUICK_FIX_INTENT, FIX]);

    let (_, first) = h.ask("vpn acting up again").await;
    let (_, second) = h.ask("vpn acting up again").await;

    let first_id: Uuid = first["request_id"].as_str().unwrap().parse().unwrap();
    let second_id: Uuid = second["request_id"].as_str().unwrap().parse().unwrap();
    assert_ne!(first_id, second_id);
}
