//! API route definitions and router builder.

pub mod ask;
pub mod health;
pub mod stats;
pub mod tickets;

use axum::Router;
use axum::routing::{delete, get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Support chain
        .route("/ask", post(ask::ask))
        // Ticket endpoints
        .route(
            "/tickets",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/tickets/{number}", get(tickets::get_ticket))
        // Queue statistics
        .route("/stats", get(stats::get_stats))
        // Conversation sessions
        .route("/sessions/{id}", delete(ask::clear_session));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
