//! End-to-end integration tests for DeskChain.
//!
//! This crate has no runtime code; everything lives under `tests/`, where
//! the full gateway router is exercised through `tower::oneshot` against
//! scripted collaborators (and, for the full-stack suite, against wiremock
//! servers standing in for the model endpoint and QuickBase).
