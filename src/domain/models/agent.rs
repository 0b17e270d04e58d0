//! Delegate agent configuration passed to the runtime.

use serde::{Deserialize, Serialize};

use super::model_tier::ModelTier;

/// One delegate agent's static configuration.
///
/// Built once at startup and immutable afterward. Serializes to the entry
/// shape the runtime accepts in its `--agents` JSON map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// When the orchestrator should pick this agent.
    pub description: String,
    /// Self-loading prompt pointing at the agent's full instruction file.
    pub prompt: String,
    /// Ordered tool names this agent may call.
    pub tools: Vec<String>,
    /// Resolved model tier.
    pub model: ModelTier,
}

impl AgentConfig {
    /// Build a definition from its four parts.
    pub fn new(
        description: impl Into<String>,
        prompt: impl Into<String>,
        tools: Vec<String>,
        model: ModelTier,
    ) -> Self {
        Self {
            description: description.into(),
            prompt: prompt.into(),
            tools,
            model,
        }
    }
}
