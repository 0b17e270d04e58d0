//! Delegate roles and model-resolution targets.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model_tier::ModelTier;

/// The four specialized delegate agents the orchestrator can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    /// Issue tracking and session handoff via the Linear tools.
    Linear,
    /// Git commits, branches, and pull requests.
    Github,
    /// Progress notifications via the Slack tools.
    Slack,
    /// Feature implementation with file, shell, and browser tools.
    Coding,
}

impl AgentRole {
    /// All delegate roles, in registry order.
    pub const ALL: [Self; 4] = [Self::Linear, Self::Github, Self::Slack, Self::Coding];

    /// Registry key for this role, as the orchestrator addresses it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Github => "github",
            Self::Slack => "slack",
            Self::Coding => "coding",
        }
    }

    /// Stem of the full-instruction template shipped for this role.
    ///
    /// The template is copied to `.agent_prompts/<stem>.md` inside the
    /// project workspace, where the self-loading prompt points.
    pub const fn prompt_stem(self) -> &'static str {
        match self {
            Self::Linear => "linear_agent_prompt",
            Self::Github => "github_agent_prompt",
            Self::Slack => "slack_agent_prompt",
            Self::Coding => "coding_agent_prompt",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything whose model tier can be overridden from the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelTarget {
    /// The root orchestrator agent.
    Orchestrator,
    /// One of the delegate roles.
    Delegate(AgentRole),
}

impl ModelTarget {
    /// Every resolvable target: the orchestrator plus the four delegates.
    pub const ALL: [Self; 5] = [
        Self::Orchestrator,
        Self::Delegate(AgentRole::Linear),
        Self::Delegate(AgentRole::Github),
        Self::Delegate(AgentRole::Slack),
        Self::Delegate(AgentRole::Coding),
    ];

    /// Environment variable consulted for a model override.
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Orchestrator => "ORCHESTRATOR_MODEL",
            Self::Delegate(AgentRole::Linear) => "LINEAR_AGENT_MODEL",
            Self::Delegate(AgentRole::Github) => "GITHUB_AGENT_MODEL",
            Self::Delegate(AgentRole::Slack) => "SLACK_AGENT_MODEL",
            Self::Delegate(AgentRole::Coding) => "CODING_AGENT_MODEL",
        }
    }

    /// Tier used when the environment provides no valid override.
    pub const fn default_tier(self) -> ModelTier {
        match self {
            Self::Delegate(AgentRole::Coding) => ModelTier::Sonnet,
            Self::Orchestrator | Self::Delegate(_) => ModelTier::Haiku,
        }
    }

    /// Whether the `inherit` tier is valid for this target.
    ///
    /// The orchestrator is the session root, so it has no parent model to
    /// inherit from.
    pub const fn allows_inherit(self) -> bool {
        matches!(self, Self::Delegate(_))
    }
}

impl fmt::Display for ModelTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orchestrator => f.write_str("orchestrator"),
            Self::Delegate(role) => f.write_str(role.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names_match_registry_keys() {
        let names: Vec<&str> = AgentRole::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["linear", "github", "slack", "coding"]);
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(ModelTarget::Orchestrator.env_var(), "ORCHESTRATOR_MODEL");
        assert_eq!(
            ModelTarget::Delegate(AgentRole::Coding).env_var(),
            "CODING_AGENT_MODEL"
        );
        assert_eq!(
            ModelTarget::Delegate(AgentRole::Linear).env_var(),
            "LINEAR_AGENT_MODEL"
        );
    }

    #[test]
    fn test_default_tiers() {
        assert_eq!(ModelTarget::Orchestrator.default_tier(), ModelTier::Haiku);
        assert_eq!(
            ModelTarget::Delegate(AgentRole::Coding).default_tier(),
            ModelTier::Sonnet
        );
        for role in [AgentRole::Linear, AgentRole::Github, AgentRole::Slack] {
            assert_eq!(
                ModelTarget::Delegate(role).default_tier(),
                ModelTier::Haiku
            );
        }
    }

    #[test]
    fn test_only_delegates_allow_inherit() {
        assert!(!ModelTarget::Orchestrator.allows_inherit());
        for role in AgentRole::ALL {
            assert!(ModelTarget::Delegate(role).allows_inherit());
        }
    }
}
