//! The delegate agent registry.
//!
//! Builds the four delegate definitions the runtime receives in its
//! `--agents` map. Prompts use the self-loading pattern: each definition
//! carries only a short pointer to its full instruction file under
//! `.agent_prompts/`, because the serialized registry travels on the
//! runtime's command line and platform command-length limits are real.

use std::collections::BTreeMap;

use crate::domain::models::tools::{
    arcade_tools, BUILTIN_TOOLS, FILE_TOOLS, PUPPETEER_TOOLS, SHELL_TOOL,
};
use crate::domain::models::{AgentConfig, AgentRole, ModelTarget, SecuritySettings};
use crate::services::model_router::ModelRouter;

/// Directory inside the project workspace holding the full per-role prompts.
pub const AGENT_PROMPTS_DIR: &str = ".agent_prompts";

/// When the orchestrator should pick each delegate.
pub const fn role_description(role: AgentRole) -> &'static str {
    match role {
        AgentRole::Linear => {
            "Manages Linear issues, project status, and session handoff. Use for any Linear operations."
        }
        AgentRole::Github => {
            "Handles Git commits, branches, and GitHub PRs. Use for version control operations."
        }
        AgentRole::Slack => {
            "Sends Slack notifications to keep users informed. Use for progress updates."
        }
        AgentRole::Coding => "Writes and tests code. Use when implementing features or fixing bugs.",
    }
}

/// Minimal prompt telling a delegate to read its full instructions.
pub fn self_loading_prompt(role: AgentRole) -> String {
    format!(
        "You are the {role} agent. Your full instructions are in the file:\n\
         {AGENT_PROMPTS_DIR}/{stem}.md\n\
         \n\
         IMPORTANT: Read that file NOW using the Read tool before doing anything else.\n\
         Follow all instructions in that file exactly.",
        role = role.name(),
        stem = role.prompt_stem(),
    )
}

/// Tool list for one delegate role.
///
/// Every delegate gets the local file tools; shell execution goes to the
/// version-control and coding roles only; the coding role additionally
/// drives the browser for verification evidence.
fn role_tools(role: AgentRole) -> Vec<String> {
    let names: Vec<&str> = match role {
        AgentRole::Coding => BUILTIN_TOOLS
            .iter()
            .chain(PUPPETEER_TOOLS.iter())
            .copied()
            .collect(),
        AgentRole::Github => arcade_tools(role)
            .iter()
            .chain(FILE_TOOLS.iter())
            .copied()
            .chain(std::iter::once(SHELL_TOOL))
            .collect(),
        AgentRole::Linear | AgentRole::Slack => arcade_tools(role)
            .iter()
            .chain(FILE_TOOLS.iter())
            .copied()
            .collect(),
    };
    names.into_iter().map(str::to_string).collect()
}

/// Build the four delegate definitions, keyed by role name.
///
/// Deterministic given the router snapshot; the only environment reads
/// happened when the snapshot was captured.
pub fn build_agent_definitions(router: &ModelRouter) -> BTreeMap<String, AgentConfig> {
    AgentRole::ALL
        .iter()
        .map(|&role| {
            (
                role.name().to_string(),
                AgentConfig::new(
                    role_description(role),
                    self_loading_prompt(role),
                    role_tools(role),
                    router.resolve(ModelTarget::Delegate(role)),
                ),
            )
        })
        .collect()
}

/// Every tool named by any definition must be covered by the permission
/// allow list, or the runtime will deny calls the registry permits.
/// Returns the uncovered tool names, empty when consistent.
pub fn uncovered_tools(
    agents: &BTreeMap<String, AgentConfig>,
    settings: &SecuritySettings,
) -> Vec<String> {
    let mut missing: Vec<String> = agents
        .values()
        .flat_map(|agent| agent.tools.iter())
        .filter(|tool| !settings.allows_tool(tool))
        .cloned()
        .collect();
    missing.sort();
    missing.dedup();
    missing
}
