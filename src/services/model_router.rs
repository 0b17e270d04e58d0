//! Model tier resolution from environment overrides.
//!
//! Each agent's tier can be overridden through its `{ROLE}_AGENT_MODEL`
//! variable (`ORCHESTRATOR_MODEL` for the root agent). Unset, empty, or
//! invalid values silently fall back to the role's documented default;
//! misconfigured model selection must never stop a session from starting.

use std::collections::HashMap;
use std::env;

use crate::domain::models::{ModelTarget, ModelTier};

/// Immutable snapshot of the model-override environment.
///
/// Captured once during process bootstrap so that resolution is a pure
/// function of the snapshot rather than of ambient process state.
#[derive(Debug, Clone, Default)]
pub struct ModelRouter {
    overrides: HashMap<ModelTarget, String>,
}

impl ModelRouter {
    /// Capture the override variables from the process environment.
    pub fn from_env() -> Self {
        let overrides = ModelTarget::ALL
            .iter()
            .filter_map(|&target| env::var(target.env_var()).ok().map(|raw| (target, raw)))
            .collect();
        Self { overrides }
    }

    /// Snapshot with explicit raw values, for construction without
    /// touching the environment.
    pub fn from_overrides(overrides: HashMap<ModelTarget, String>) -> Self {
        Self { overrides }
    }

    /// Resolve the tier for `target`, falling back silently on invalid input.
    pub fn resolve(&self, target: ModelTarget) -> ModelTier {
        Self::resolve_raw(target, self.overrides.get(&target).map(String::as_str))
    }

    /// Pure resolution of one raw override value against a target's
    /// valid set and default.
    ///
    /// `inherit` is rejected for the orchestrator, which has no parent
    /// model to defer to.
    pub fn resolve_raw(target: ModelTarget, raw: Option<&str>) -> ModelTier {
        match raw.and_then(ModelTier::parse) {
            Some(tier) if tier.is_inherit() && !target.allows_inherit() => target.default_tier(),
            Some(tier) => tier,
            None => target.default_tier(),
        }
    }

    /// The raw override value captured for `target`, if any.
    pub fn raw_override(&self, target: ModelTarget) -> Option<&str> {
        self.overrides.get(&target).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AgentRole;

    #[test]
    fn test_unset_value_falls_back_to_default() {
        for target in ModelTarget::ALL {
            assert_eq!(
                ModelRouter::resolve_raw(target, None),
                target.default_tier()
            );
        }
    }

    #[test]
    fn test_empty_and_invalid_values_fall_back_to_default() {
        let coding = ModelTarget::Delegate(AgentRole::Coding);
        assert_eq!(ModelRouter::resolve_raw(coding, Some("")), ModelTier::Sonnet);
        assert_eq!(
            ModelRouter::resolve_raw(coding, Some("gpt-4o")),
            ModelTier::Sonnet
        );
        assert_eq!(
            ModelRouter::resolve_raw(coding, Some("sonnet-latest")),
            ModelTier::Sonnet
        );
    }

    #[test]
    fn test_valid_values_are_case_and_whitespace_insensitive() {
        let coding = ModelTarget::Delegate(AgentRole::Coding);
        assert_eq!(
            ModelRouter::resolve_raw(coding, Some(" Sonnet ")),
            ModelTier::Sonnet
        );
        assert_eq!(
            ModelRouter::resolve_raw(coding, Some("OPUS")),
            ModelTier::Opus
        );
    }

    #[test]
    fn test_delegates_may_inherit() {
        let linear = ModelTarget::Delegate(AgentRole::Linear);
        assert_eq!(
            ModelRouter::resolve_raw(linear, Some("inherit")),
            ModelTier::Inherit
        );
    }

    #[test]
    fn test_orchestrator_rejects_inherit() {
        assert_eq!(
            ModelRouter::resolve_raw(ModelTarget::Orchestrator, Some("inherit")),
            ModelTier::Haiku
        );
    }

    #[test]
    fn test_snapshot_resolution_uses_captured_values() {
        let mut overrides = HashMap::new();
        overrides.insert(
            ModelTarget::Delegate(AgentRole::Slack),
            "opus".to_string(),
        );
        let router = ModelRouter::from_overrides(overrides);
        assert_eq!(
            router.resolve(ModelTarget::Delegate(AgentRole::Slack)),
            ModelTier::Opus
        );
        // Untouched targets keep their defaults
        assert_eq!(
            router.resolve(ModelTarget::Delegate(AgentRole::Github)),
            ModelTier::Haiku
        );
    }
}
