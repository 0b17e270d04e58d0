//! Infrastructure layer module
//!
//! This module contains everything that touches the outside world:
//! - Configuration management
//! - Prompt and spec template loading
//! - Project workspace bootstrap
//! - The external Claude Code CLI runtime

pub mod config;
pub mod prompts;
pub mod runtime;
pub mod workspace;
