//! Harness configuration loading
//!
//! Hierarchical configuration using figment: programmatic defaults, then
//! `.foreman/*.yaml` files, then `FOREMAN_*` environment overrides, with
//! validation after extraction.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
