//! Session assembly: everything the runtime needs, built in one pass.
//!
//! Mirrors the startup order the session contract requires: gateway
//! validation happens before this module runs, settings are built here
//! and persisted by the workspace layer before launch, and the runtime
//! receives the finished option set by value.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::warn;

use crate::domain::models::{
    McpServerConfig, ModelTarget, SecuritySettings, SessionOptions,
};
use crate::services::agent_registry::{build_agent_definitions, uncovered_tools};
use crate::services::gateway::ArcadeConfig;
use crate::services::model_router::ModelRouter;

/// Hook, settings, agents, servers: the full session configuration.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    /// Security settings to persist before launch.
    pub settings: SecuritySettings,
    /// Options handed to the runtime launcher.
    pub options: SessionOptions,
}

/// Self-loading system prompt for the root orchestrator.
pub fn orchestrator_prompt() -> String {
    "You are the ORCHESTRATOR agent coordinating specialized agents to build applications.\n\
     \n\
     IMPORTANT: Your full instructions are in the file:\n\
     .agent_prompts/orchestrator_prompt.md\n\
     \n\
     Read that file NOW using the Read tool before doing anything else.\n\
     Follow all instructions in that file exactly.\n\
     \n\
     Quick reference (read full file for details):\n\
     - Delegate to: linear, coding, github, slack agents via Task tool\n\
     - ALWAYS pass full context between agents (they don't share memory)\n\
     - MANDATORY: Run verification test before new work\n\
     - MANDATORY: Require screenshot evidence before marking issues Done"
        .to_string()
}

/// Assemble the complete session configuration for one project.
///
/// `project_dir` should already be resolved to an absolute path; the
/// settings file lands inside it under the fixed name. The gate hook is
/// registered on shell-tool invocations only.
pub fn plan_session(
    project_dir: &Path,
    router: &ModelRouter,
    arcade: &ArcadeConfig,
    max_turns: u32,
    gate_command: &str,
) -> SessionPlan {
    let settings = SecuritySettings::standard(gate_command);
    let agents = build_agent_definitions(router);

    let missing = uncovered_tools(&agents, &settings);
    if !missing.is_empty() {
        warn!(
            tools = ?missing,
            "agent registry names tools the permission allow list does not cover"
        );
    }

    let mut mcp_servers = BTreeMap::new();
    mcp_servers.insert(
        "puppeteer".to_string(),
        McpServerConfig::stdio("npx", vec!["puppeteer-mcp-server".to_string()]),
    );
    mcp_servers.insert("arcade".to_string(), arcade.to_server_config());

    let options = SessionOptions {
        model: router.resolve(ModelTarget::Orchestrator),
        system_prompt: orchestrator_prompt(),
        agents,
        mcp_servers,
        settings_path: project_dir.join(SecuritySettings::FILE_NAME),
        max_turns,
        cwd: project_dir.to_path_buf(),
    };

    SessionPlan { settings, options }
}
