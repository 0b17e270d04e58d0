//! Environment-driven model resolution.
//!
//! `ModelRouter::from_env` reads the five override variables; these tests
//! exercise that capture through a scoped environment so they stay safe to
//! run alongside the rest of the suite.

use foreman::domain::models::AgentRole;
use foreman::{ModelRouter, ModelTarget, ModelTier};

/// Every override variable, for tests that need a clean slate.
const ALL_VARS: [&str; 5] = [
    "ORCHESTRATOR_MODEL",
    "LINEAR_AGENT_MODEL",
    "GITHUB_AGENT_MODEL",
    "SLACK_AGENT_MODEL",
    "CODING_AGENT_MODEL",
];

fn with_clean_env<R>(f: impl FnOnce() -> R) -> R {
    let unset: Vec<(&str, Option<&str>)> = ALL_VARS.iter().map(|&v| (v, None)).collect();
    temp_env::with_vars(unset, f)
}

#[test]
fn test_defaults_with_no_overrides_set() {
    with_clean_env(|| {
        let router = ModelRouter::from_env();
        assert_eq!(router.resolve(ModelTarget::Orchestrator), ModelTier::Haiku);
        assert_eq!(
            router.resolve(ModelTarget::Delegate(AgentRole::Coding)),
            ModelTier::Sonnet
        );
        for role in [AgentRole::Linear, AgentRole::Github, AgentRole::Slack] {
            assert_eq!(
                router.resolve(ModelTarget::Delegate(role)),
                ModelTier::Haiku
            );
        }
    });
}

#[test]
fn test_single_override_leaves_other_targets_alone() {
    with_clean_env(|| {
        temp_env::with_var("CODING_AGENT_MODEL", Some("opus"), || {
            let router = ModelRouter::from_env();
            assert_eq!(
                router.resolve(ModelTarget::Delegate(AgentRole::Coding)),
                ModelTier::Opus
            );
            assert_eq!(
                router.resolve(ModelTarget::Delegate(AgentRole::Linear)),
                ModelTier::Haiku
            );
            assert_eq!(router.resolve(ModelTarget::Orchestrator), ModelTier::Haiku);
        });
    });
}

#[test]
fn test_overrides_are_case_and_whitespace_insensitive() {
    with_clean_env(|| {
        temp_env::with_var("SLACK_AGENT_MODEL", Some(" OPUS "), || {
            let router = ModelRouter::from_env();
            assert_eq!(
                router.resolve(ModelTarget::Delegate(AgentRole::Slack)),
                ModelTier::Opus
            );
            // The raw value is preserved for diagnostics
            assert_eq!(
                router.raw_override(ModelTarget::Delegate(AgentRole::Slack)),
                Some(" OPUS ")
            );
        });
    });
}

#[test]
fn test_invalid_override_falls_back_silently() {
    with_clean_env(|| {
        temp_env::with_var("GITHUB_AGENT_MODEL", Some("gpt-4o"), || {
            let router = ModelRouter::from_env();
            assert_eq!(
                router.resolve(ModelTarget::Delegate(AgentRole::Github)),
                ModelTier::Haiku
            );
        });
    });
}

#[test]
fn test_empty_override_falls_back_silently() {
    with_clean_env(|| {
        temp_env::with_var("CODING_AGENT_MODEL", Some(""), || {
            let router = ModelRouter::from_env();
            assert_eq!(
                router.resolve(ModelTarget::Delegate(AgentRole::Coding)),
                ModelTier::Sonnet
            );
        });
    });
}

#[test]
fn test_orchestrator_rejects_inherit_while_delegates_accept_it() {
    with_clean_env(|| {
        temp_env::with_vars(
            [
                ("ORCHESTRATOR_MODEL", Some("inherit")),
                ("LINEAR_AGENT_MODEL", Some("inherit")),
            ],
            || {
                let router = ModelRouter::from_env();
                // The session root has no parent model to defer to
                assert_eq!(router.resolve(ModelTarget::Orchestrator), ModelTier::Haiku);
                assert_eq!(
                    router.resolve(ModelTarget::Delegate(AgentRole::Linear)),
                    ModelTier::Inherit
                );
            },
        );
    });
}

#[test]
fn test_router_is_a_snapshot_not_a_live_view() {
    let router = with_clean_env(|| {
        temp_env::with_var("SLACK_AGENT_MODEL", Some("opus"), ModelRouter::from_env)
    });

    // The variable is gone, but the captured snapshot still resolves it
    assert_eq!(
        router.resolve(ModelTarget::Delegate(AgentRole::Slack)),
        ModelTier::Opus
    );
}

#[test]
fn test_all_five_targets_can_be_overridden_at_once() {
    with_clean_env(|| {
        temp_env::with_vars(
            [
                ("ORCHESTRATOR_MODEL", Some("opus")),
                ("LINEAR_AGENT_MODEL", Some("sonnet")),
                ("GITHUB_AGENT_MODEL", Some("sonnet")),
                ("SLACK_AGENT_MODEL", Some("opus")),
                ("CODING_AGENT_MODEL", Some("haiku")),
            ],
            || {
                let router = ModelRouter::from_env();
                assert_eq!(router.resolve(ModelTarget::Orchestrator), ModelTier::Opus);
                assert_eq!(
                    router.resolve(ModelTarget::Delegate(AgentRole::Linear)),
                    ModelTier::Sonnet
                );
                assert_eq!(
                    router.resolve(ModelTarget::Delegate(AgentRole::Github)),
                    ModelTier::Sonnet
                );
                assert_eq!(
                    router.resolve(ModelTarget::Delegate(AgentRole::Slack)),
                    ModelTier::Opus
                );
                assert_eq!(
                    router.resolve(ModelTarget::Delegate(AgentRole::Coding)),
                    ModelTier::Haiku
                );
            },
        );
    });
}
