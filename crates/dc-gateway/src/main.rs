//! DeskChain gateway — IT support REST server.
//!
//! Wires the support chain (routing model + handlers), the knowledge
//! base, and the QuickBase ticket store into a single Axum service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use dc_chain::SupportChain;
use dc_gateway::config::GatewayConfig;
use dc_gateway::routes;
use dc_gateway::state::AppState;
use dc_knowledge::{KeywordSearch, KnowledgeBase};
use dc_llm::OpenAiChatClient;
use dc_tickets::QuickbaseTicketStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dc-gateway starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => GatewayConfig::from_file(&path)?,
        None => GatewayConfig::from_env()?,
    };
    tracing::info!(
        model = %config.llm.model,
        realm = %config.quickbase.realm,
        "config loaded"
    );

    // ── Knowledge base ──────────────────────────────────────────
    let base = match &config.knowledge_file {
        Some(path) => {
            let base = KnowledgeBase::from_file(path)?;
            tracing::info!(path = %path, entries = base.len(), "knowledge base loaded");
            base
        }
        None => KnowledgeBase::builtin(),
    };
    let search = Arc::new(KeywordSearch::new(base));

    // ── Support chain ───────────────────────────────────────────
    let model = Arc::new(OpenAiChatClient::new(config.llm.clone()));
    let chain = Arc::new(SupportChain::new(model, search));

    // ── Ticket store ────────────────────────────────────────────
    let tickets = Arc::new(QuickbaseTicketStore::new(config.quickbase.clone()));

    let state = AppState::with_memory_turns(chain, tickets, config.memory_turns);
    let app = routes::build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
