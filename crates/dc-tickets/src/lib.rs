//! Ticket store integration for DeskChain.
//!
//! Provides a typed ticket-store abstraction for the support gateway:
//! - `TicketStore` trait for create/lookup/stats (mockable in tests)
//! - `QuickbaseTicketStore` against the QuickBase records REST API
//! - `MockTicketStore` for testing without a store

pub mod config;
pub mod error;
pub mod mock;
pub mod quickbase;
pub mod store;

// Re-exports for convenience.
pub use config::QuickbaseConfig;
pub use error::{TicketResult, TicketStoreError};
pub use mock::MockTicketStore;
pub use quickbase::QuickbaseTicketStore;
pub use store::TicketStore;
