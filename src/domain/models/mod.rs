//! Domain models for agents, policies, and session configuration.

pub mod agent;
pub mod config;
pub mod model_tier;
pub mod policy;
pub mod role;
pub mod session;
pub mod settings;
pub mod template;
pub mod tools;

pub use agent::AgentConfig;
pub use config::{AssetsConfig, HarnessConfig, LoggingConfig, RuntimeConfig};
pub use model_tier::ModelTier;
pub use policy::{CommandRule, MatchKind, PolicyDecision};
pub use role::{AgentRole, ModelTarget};
pub use session::{McpServerConfig, SessionOptions};
pub use settings::{
    HookCommand, HookMatcher, HookSettings, PermissionMode, PermissionSettings, SandboxSettings,
    SecuritySettings,
};
pub use template::AgentDefinition;
