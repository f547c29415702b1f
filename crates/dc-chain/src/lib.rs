//! Routing and handler pipeline for DeskChain.
//!
//! One `process` call classifies a question with the routing model,
//! dispatches to exactly one handler (quick-fix answers grounded on the
//! knowledge base, ticket parameter recommendations, status checks, bot
//! commands), and shapes the outcome into a tagged [`SupportReply`].
//! Model output decodes strictly into the shared schemas before anything
//! acts on it.

pub mod error;
pub mod memory;
pub mod orchestrator;
pub mod prompt;
pub mod quick_fix;
pub mod router;
pub mod ticket;

// Re-export key types for convenience
pub use dc_protocol::SupportReply;
pub use error::{ChainError, ChainResult};
pub use memory::{ConversationMemory, ConversationTurn, DEFAULT_MAX_TURNS};
pub use orchestrator::SupportChain;
pub use quick_fix::QuickFixHandler;
pub use router::SupportRouter;
pub use ticket::TicketHandler;
