//! DeskChain gateway — library crate for the IT support REST server.
//!
//! Re-exports all modules so the binary (`main.rs`) and external crates
//! (e.g. `dc-e2e-tests`) can access internal types like `AppState`,
//! `build_router`, and `GatewayConfig`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
