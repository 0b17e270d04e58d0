//! Security settings persisted for the external runtime.
//!
//! The runtime reads permissions from the settings file in the project
//! workspace, not from in-memory state, so the session must not start
//! until this structure has been written to disk.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tools::{ARCADE_TOOLS_SCOPE, PUPPETEER_TOOLS};

/// Sandbox flags for shell-command isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SandboxSettings {
    /// OS-level isolation for shell commands.
    pub enabled: bool,
    /// Skip per-command prompts while the sandbox is active.
    pub auto_allow_bash_if_sandboxed: bool,
}

/// Default decision for operations not covered by an allow pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PermissionMode {
    /// Apply file edits without prompting.
    AcceptEdits,
    /// Accept every operation.
    AcceptAll,
    /// Reject operations outside the allow list.
    Reject,
    /// Prompt interactively.
    Ask,
}

impl fmt::Display for PermissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AcceptEdits => "acceptEdits",
            Self::AcceptAll => "acceptAll",
            Self::Reject => "reject",
            Self::Ask => "ask",
        };
        f.write_str(s)
    }
}

/// File and tool permission policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSettings {
    /// Default decision for uncovered operations.
    pub default_mode: PermissionMode,
    /// Ordered allow patterns.
    pub allow: Vec<String>,
}

/// One command invoked when a hook fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookCommand {
    /// Hook kind; always `"command"` here.
    #[serde(rename = "type")]
    pub kind: String,
    /// Command line the runtime executes, with the hook payload on stdin.
    pub command: String,
}

/// Hook commands bound to a tool-name matcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookMatcher {
    /// Tool name the hooks apply to.
    pub matcher: String,
    /// Commands run when the matcher fires.
    pub hooks: Vec<HookCommand>,
}

/// Hook registrations by lifecycle event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookSettings {
    /// Hooks evaluated before a tool call executes.
    #[serde(rename = "PreToolUse", default, skip_serializing_if = "Vec::is_empty")]
    pub pre_tool_use: Vec<HookMatcher>,
}

/// Session-wide permission policy written to the project workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecuritySettings {
    /// Shell-command isolation flags.
    pub sandbox: SandboxSettings,
    /// File and tool permissions.
    pub permissions: PermissionSettings,
    /// Pre-execution hook registrations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hooks: Option<HookSettings>,
}

impl SecuritySettings {
    /// Filename written inside the project workspace.
    pub const FILE_NAME: &'static str = ".claude_settings.json";

    /// Standard policy: sandboxed shell, file operations scoped to the
    /// project root, the browser and gateway tool scopes, and the command
    /// gate registered as a pre-execution hook on shell calls.
    pub fn standard(gate_command: &str) -> Self {
        let mut allow: Vec<String> = vec![
            // File operations stay inside the project directory
            "Read(./**)".to_string(),
            "Write(./**)".to_string(),
            "Edit(./**)".to_string(),
            "Glob(./**)".to_string(),
            "Grep(./**)".to_string(),
            // Shell is granted here; individual commands are judged by the
            // pre-execution hook below
            "Bash(*)".to_string(),
        ];
        allow.extend(PUPPETEER_TOOLS.iter().map(|t| (*t).to_string()));
        allow.push(ARCADE_TOOLS_SCOPE.to_string());

        Self {
            sandbox: SandboxSettings {
                enabled: true,
                auto_allow_bash_if_sandboxed: true,
            },
            permissions: PermissionSettings {
                default_mode: PermissionMode::AcceptEdits,
                allow,
            },
            hooks: Some(HookSettings {
                pre_tool_use: vec![HookMatcher {
                    matcher: "Bash".to_string(),
                    hooks: vec![HookCommand {
                        kind: "command".to_string(),
                        command: gate_command.to_string(),
                    }],
                }],
            }),
        }
    }

    /// True if `tool` is covered by some allow pattern.
    ///
    /// A pattern covers a tool when it names the tool exactly, scopes it
    /// with a parenthesized matcher (`Read(./**)`), or names a server
    /// prefix covering the whole MCP server (`mcp__arcade`).
    pub fn allows_tool(&self, tool: &str) -> bool {
        self.permissions.allow.iter().any(|pattern| {
            let base = pattern.split('(').next().unwrap_or(pattern);
            base == tool || tool.starts_with(&format!("{base}__"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_settings_grant_shell_and_project_files() {
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");
        assert!(settings.sandbox.enabled);
        assert!(settings.sandbox.auto_allow_bash_if_sandboxed);
        assert_eq!(
            settings.permissions.default_mode,
            PermissionMode::AcceptEdits
        );
        let allow = &settings.permissions.allow;
        assert!(allow.contains(&"Bash(*)".to_string()));
        assert!(allow.contains(&"Read(./**)".to_string()));
        assert!(allow.contains(&"mcp__arcade".to_string()));
        assert!(allow.contains(&"mcp__puppeteer__puppeteer_screenshot".to_string()));
    }

    #[test]
    fn test_standard_settings_register_the_gate_hook() {
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");
        let hooks = settings.hooks.as_ref().unwrap();
        assert_eq!(hooks.pre_tool_use.len(), 1);
        assert_eq!(hooks.pre_tool_use[0].matcher, "Bash");
        assert_eq!(
            hooks.pre_tool_use[0].hooks[0].command,
            "foreman hook pre-tool-use"
        );
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["sandbox"]["autoAllowBashIfSandboxed"], true);
        assert_eq!(value["permissions"]["defaultMode"], "acceptEdits");
        assert!(value["hooks"]["PreToolUse"].is_array());
    }

    #[test]
    fn test_allows_tool_covers_scoped_and_server_patterns() {
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");
        assert!(settings.allows_tool("Read"));
        assert!(settings.allows_tool("Bash"));
        assert!(settings.allows_tool("mcp__arcade__Linear_CreateIssue"));
        assert!(settings.allows_tool("mcp__puppeteer__puppeteer_click"));
        assert!(!settings.allows_tool("WebSearch"));
    }
}
