//! Shared application state for the Axum server.

use std::sync::Arc;

use tokio::sync::RwLock;

use dc_chain::{ConversationMemory, SupportChain};
use dc_tickets::TicketStore;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// The routing/handler pipeline.
    pub chain: Arc<SupportChain>,
    /// External ticket store.
    pub tickets: Arc<dyn TicketStore>,
    /// Per-session conversation history.
    pub memory: Arc<RwLock<ConversationMemory>>,
}

impl AppState {
    /// State with the default conversation window.
    pub fn new(chain: Arc<SupportChain>, tickets: Arc<dyn TicketStore>) -> Self {
        Self {
            chain,
            tickets,
            memory: Arc::new(RwLock::new(ConversationMemory::default())),
        }
    }

    /// State with an explicit per-session turn cap.
    pub fn with_memory_turns(
        chain: Arc<SupportChain>,
        tickets: Arc<dyn TicketStore>,
        max_turns: usize,
    ) -> Self {
        Self {
            chain,
            tickets,
            memory: Arc::new(RwLock::new(ConversationMemory::new(max_turns))),
        }
    }
}
