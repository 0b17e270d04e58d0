//! Session configuration handed to the external runtime.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::agent::AgentConfig;
use super::model_tier::ModelTier;

/// Connection details for one MCP server.
///
/// Serializes to the entry shape the runtime accepts in its `--mcp-config`
/// JSON: stdio servers carry `command`/`args`, remote servers carry an
/// explicit `"type": "http"` with `url` and auth headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum McpServerConfig {
    /// Remote HTTP endpoint.
    Http {
        /// Transport discriminator; always `"http"`.
        #[serde(rename = "type")]
        kind: String,
        /// Endpoint URL.
        url: String,
        /// Request headers, typically authorization.
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        headers: BTreeMap<String, String>,
    },
    /// Subprocess speaking stdio.
    Stdio {
        /// Executable to spawn.
        command: String,
        /// Arguments passed to the executable.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
    },
}

impl McpServerConfig {
    /// Entry for a remote HTTP server.
    pub fn http(url: impl Into<String>, headers: BTreeMap<String, String>) -> Self {
        Self::Http {
            kind: "http".to_string(),
            url: url.into(),
            headers,
        }
    }

    /// Entry for a spawned stdio server.
    pub fn stdio(command: impl Into<String>, args: Vec<String>) -> Self {
        Self::Stdio {
            command: command.into(),
            args,
        }
    }
}

/// Everything the runtime needs to start one orchestrator session.
///
/// Built once per process invocation and passed by value to the launcher;
/// never persisted. The task message travels separately since it is per
/// invocation, not per session shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOptions {
    /// Model tier for the root orchestrator.
    pub model: ModelTier,
    /// Self-loading system prompt for the orchestrator.
    pub system_prompt: String,
    /// Delegate agents keyed by role name.
    pub agents: BTreeMap<String, AgentConfig>,
    /// MCP servers keyed by server name.
    pub mcp_servers: BTreeMap<String, McpServerConfig>,
    /// Persisted settings file the runtime must load.
    pub settings_path: PathBuf,
    /// Hard cap on conversation turns, bounding runaway sessions.
    pub max_turns: u32,
    /// Working directory for the session.
    pub cwd: PathBuf,
}
