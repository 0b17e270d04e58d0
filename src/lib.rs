//! Foreman - multi-agent coding session harness
//!
//! Foreman drives long-running autonomous coding sessions through the
//! external Claude Code CLI. A root orchestrator delegates to four
//! specialized agents (Linear, GitHub, Slack, coding), all running under
//! a written security policy with a command gate hooked in front of
//! every shell call.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): errors and the pure session models
//! - **Service Layer** (`services`): command gate, model routing, agent
//!   registry, session assembly
//! - **Infrastructure Layer** (`infrastructure`): configuration, prompt
//!   templates, workspace bootstrap, the CLI runtime launcher
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use foreman::services::{plan_session, ArcadeConfig, ModelRouter};
//!
//! let plan = plan_session(
//!     std::path::Path::new("/work/my-app"),
//!     &ModelRouter::from_env(),
//!     &ArcadeConfig::from_env()?,
//!     1000,
//!     "foreman hook pre-tool-use",
//! );
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::models::{
    AgentConfig, AgentRole, HarnessConfig, McpServerConfig, ModelTarget, ModelTier,
    PolicyDecision, SecuritySettings, SessionOptions,
};
pub use domain::{HarnessError, HarnessResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{plan_session, ArcadeConfig, CommandGate, ModelRouter, SessionPlan};
