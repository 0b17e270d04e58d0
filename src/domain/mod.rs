//! Domain layer for the foreman harness.
//!
//! Core value types for agents, policies, and session configuration,
//! plus the error taxonomy shared by every layer.

pub mod errors;
pub mod models;

// Re-export error types for convenient access
pub use errors::{HarnessError, HarnessResult};
