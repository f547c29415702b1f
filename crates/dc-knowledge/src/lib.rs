//! Knowledge retrieval for DeskChain.
//!
//! Provides the keyword-matched knowledge base behind the quick-fix branch,
//! a `KnowledgeSearch` abstraction so the retrieval backend can be swapped
//! out (vector search later), and a scripted mock for tests.

pub mod base;
pub mod error;
pub mod mock;
pub mod search;

// Re-export key types for convenience
pub use base::{GENERAL_GUIDANCE, KbEntry, KnowledgeBase};
pub use error::{KnowledgeError, KnowledgeResult};
pub use mock::StaticSearch;
pub use search::{KeywordSearch, KnowledgeSearch};
