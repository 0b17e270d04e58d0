//! Runtime hook endpoints.
//!
//! The security settings written into each workspace register this
//! binary as a `PreToolUse` hook on shell-tool calls. The runtime pipes
//! the pending tool call to stdin as JSON and reads the permission
//! decision back from stdout. The process always exits zero: a denial
//! is data, not a failure, and a crashing hook must never take the
//! session down with it.

use anyhow::Result;
use clap::Subcommand;
use serde::Deserialize;
use tokio::io::AsyncReadExt;

use crate::domain::models::tools::SHELL_TOOL;
use crate::domain::models::PolicyDecision;
use crate::services::CommandGate;

#[derive(Subcommand, Debug)]
pub enum HookCommands {
    /// Judge a shell command before the runtime executes it
    PreToolUse,
}

#[derive(Debug, Deserialize)]
struct HookPayload {
    #[serde(default)]
    tool_name: String,
    #[serde(default)]
    tool_input: serde_json::Value,
}

pub async fn execute(command: HookCommands, _json_mode: bool) -> Result<()> {
    match command {
        HookCommands::PreToolUse => {
            let mut payload = String::new();
            if let Err(e) = tokio::io::stdin().read_to_string(&mut payload).await {
                tracing::debug!(error = %e, "failed to read hook payload");
            }

            // Value's Display prints compact JSON; an unreadable payload
            // falls through to the empty no-opinion response.
            println!("{}", pre_tool_use_response(&payload));
            Ok(())
        }
    }
}

/// Decide on one pending tool call.
///
/// Only well-formed shell calls get a verdict; anything else returns an
/// empty object, meaning "no opinion", and leaves the decision to the
/// runtime's own permission settings.
pub fn pre_tool_use_response(payload: &str) -> serde_json::Value {
    let Ok(payload) = serde_json::from_str::<HookPayload>(payload) else {
        return serde_json::json!({});
    };
    if payload.tool_name != SHELL_TOOL {
        return serde_json::json!({});
    }
    let Some(command) = payload.tool_input.get("command").and_then(|c| c.as_str()) else {
        return serde_json::json!({});
    };

    let gate = CommandGate::with_defaults();
    let (decision, reason) = match gate.evaluate(command) {
        PolicyDecision::Allowed => {
            ("allow".to_string(), "Command allowed by security policy".to_string())
        }
        PolicyDecision::Denied { reason } => ("deny".to_string(), reason),
    };

    tracing::debug!(command, decision = %decision, "judged shell command");

    serde_json::json!({
        "hookSpecificOutput": {
            "hookEventName": "PreToolUse",
            "permissionDecision": decision,
            "permissionDecisionReason": reason,
        }
    })
}
