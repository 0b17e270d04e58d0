//! Claude Code CLI launcher.
//!
//! Spawns the external `claude` binary for one orchestration session and
//! parses its `stream-json` output line by line. The harness never talks
//! to a model API directly; everything goes through the CLI so the
//! runtime's own sandbox and settings enforcement stay in the loop.

use std::process::Stdio;

use chrono::{DateTime, Utc};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use uuid::Uuid;

use crate::domain::models::{RuntimeConfig, SessionOptions};
use crate::domain::{HarnessError, HarnessResult};

/// One parsed event from the runtime's stream-json output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeEvent {
    /// Assistant-visible text.
    AssistantText { content: String },
    /// A tool call started.
    ToolStart { name: String, id: String },
    /// A tool call finished.
    ToolResult {
        id: String,
        result: String,
        is_error: bool,
    },
    /// Runtime status line (session init and similar).
    Status { message: String },
    /// Error reported inside the stream.
    Error { message: String },
    /// Final result event closing the session.
    Completed {
        result: String,
        session_id: Option<Uuid>,
        turns: u32,
        is_error: bool,
    },
}

/// Summary of a finished session.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub session_id: Option<Uuid>,
    pub result: Option<String>,
    pub turns: u32,
    /// False when the runtime's final result event flagged an error even
    /// though the process itself exited cleanly.
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunOutcome {
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }
}

/// Launcher for the external Claude Code CLI.
#[derive(Debug, Clone)]
pub struct ClaudeRuntime {
    config: RuntimeConfig,
}

impl ClaudeRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Probe the runtime binary, returning its version string if present.
    pub async fn version(&self) -> Option<String> {
        let output = Command::new(&self.config.binary_path)
            .arg("--version")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .ok()?;

        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }

    pub async fn is_available(&self) -> bool {
        self.version().await.is_some()
    }

    /// Build the CLI argument vector for a session.
    ///
    /// The agent and MCP server maps are passed as inline JSON; the
    /// security settings travel by path because the runtime re-reads the
    /// settings file itself.
    pub fn build_args(&self, options: &SessionOptions, task: &str) -> HarnessResult<Vec<String>> {
        let mut args = vec![
            "--print".to_string(),
            "--output-format".to_string(),
            "stream-json".to_string(),
            "--verbose".to_string(),
            "--max-turns".to_string(),
            options.max_turns.to_string(),
            "--model".to_string(),
            options.model.to_string(),
        ];

        if !options.system_prompt.is_empty() {
            args.push("--system-prompt".to_string());
            args.push(options.system_prompt.clone());
        }

        args.push("--agents".to_string());
        args.push(serde_json::to_string(&options.agents)?);

        args.push("--mcp-config".to_string());
        args.push(serde_json::to_string(&options.mcp_servers)?);

        args.push("--settings".to_string());
        args.push(options.settings_path.display().to_string());

        args.extend(self.config.extra_flags.iter().cloned());

        args.push("-p".to_string());
        args.push(task.to_string());

        Ok(args)
    }

    /// Run one session to completion, invoking `on_event` for every
    /// parsed stream event as it arrives.
    ///
    /// A non-zero exit from the runtime process is an error; a clean exit
    /// whose final result event is flagged as an error is reported
    /// through [`RunOutcome::success`] instead.
    pub async fn run<F>(
        &self,
        options: &SessionOptions,
        task: &str,
        mut on_event: F,
    ) -> HarnessResult<RunOutcome>
    where
        F: FnMut(&RuntimeEvent),
    {
        let args = self.build_args(options, task)?;
        let started_at = Utc::now();

        tracing::info!(
            binary = %self.config.binary_path,
            model = %options.model,
            max_turns = options.max_turns,
            cwd = %options.cwd.display(),
            "launching runtime session"
        );

        let mut child = Command::new(&self.config.binary_path)
            .args(&args)
            .current_dir(&options.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| HarnessError::RuntimeLaunch {
                binary: self.config.binary_path.clone(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| HarnessError::RuntimeFailed("failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| HarnessError::RuntimeFailed("failed to capture stderr".to_string()))?;

        let mut session_id = None;
        let mut result = None;
        let mut turns = 0u32;
        let mut assistant_messages = 0u32;
        let mut result_is_error = false;

        let mut stdout_lines = BufReader::new(stdout).lines();
        while let Ok(Some(line)) = stdout_lines.next_line().await {
            for event in parse_output_line(&line) {
                match &event {
                    RuntimeEvent::AssistantText { .. } => assistant_messages += 1,
                    RuntimeEvent::Completed {
                        result: text,
                        session_id: id,
                        turns: n,
                        is_error,
                    } => {
                        result = Some(text.clone());
                        session_id = *id;
                        turns = *n;
                        result_is_error = *is_error;
                    }
                    _ => {}
                }
                on_event(&event);
            }
        }

        let mut error_text = String::new();
        let mut stderr_lines = BufReader::new(stderr).lines();
        while let Ok(Some(line)) = stderr_lines.next_line().await {
            error_text.push_str(&line);
            error_text.push('\n');
        }

        let status = child
            .wait()
            .await
            .map_err(|e| HarnessError::RuntimeFailed(format!("failed to wait for runtime: {e}")))?;

        if !status.success() {
            let message = if error_text.trim().is_empty() {
                format!("runtime exited with code {:?}", status.code())
            } else {
                error_text.trim().to_string()
            };
            return Err(HarnessError::RuntimeFailed(message));
        }

        Ok(RunOutcome {
            session_id,
            result,
            turns: if turns > 0 { turns } else { assistant_messages },
            success: !result_is_error,
            started_at,
            finished_at: Utc::now(),
        })
    }
}

/// Parse one stream-json line into zero or more events.
///
/// Assistant messages carry a content array that can mix text and tool
/// calls, so a single line may yield several events.
fn parse_stream_json(line: &str) -> Vec<RuntimeEvent> {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(line) else {
        return vec![];
    };
    let Some(event_type) = json.get("type").and_then(|t| t.as_str()) else {
        return vec![];
    };

    match event_type {
        "system" => {
            let message = json
                .get("subtype")
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("system")
                .to_string();
            vec![RuntimeEvent::Status { message }]
        }

        "assistant" => content_blocks(&json)
            .iter()
            .filter_map(|block| match block.get("type").and_then(|t| t.as_str()) {
                Some("text") => {
                    let text = block.get("text").and_then(|t| t.as_str()).unwrap_or("");
                    if text.is_empty() {
                        None
                    } else {
                        Some(RuntimeEvent::AssistantText {
                            content: text.to_string(),
                        })
                    }
                }
                Some("tool_use") => Some(RuntimeEvent::ToolStart {
                    name: block
                        .get("name")
                        .and_then(|n| n.as_str())
                        .unwrap_or("unknown")
                        .to_string(),
                    id: block
                        .get("id")
                        .and_then(|i| i.as_str())
                        .unwrap_or("")
                        .to_string(),
                }),
                _ => None,
            })
            .collect(),

        "user" => content_blocks(&json)
            .iter()
            .filter_map(|block| {
                if block.get("type").and_then(|t| t.as_str()) != Some("tool_result") {
                    return None;
                }
                Some(RuntimeEvent::ToolResult {
                    id: block
                        .get("tool_use_id")
                        .and_then(|i| i.as_str())
                        .unwrap_or("")
                        .to_string(),
                    result: block
                        .get("content")
                        .map(|c| {
                            c.as_str()
                                .map_or_else(|| c.to_string(), std::string::ToString::to_string)
                        })
                        .unwrap_or_default(),
                    is_error: block
                        .get("is_error")
                        .and_then(|e| e.as_bool())
                        .unwrap_or(false),
                })
            })
            .collect(),

        "result" => {
            let result = json
                .get("result")
                .and_then(|r| r.as_str())
                .unwrap_or("")
                .to_string();
            let session_id = json
                .get("session_id")
                .and_then(|s| s.as_str())
                .and_then(|s| Uuid::parse_str(s).ok());
            let turns = u32::try_from(
                json.get("num_turns")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0),
            )
            .unwrap_or(u32::MAX);
            let is_error = json
                .get("is_error")
                .and_then(|e| e.as_bool())
                .unwrap_or(false);
            vec![RuntimeEvent::Completed {
                result,
                session_id,
                turns,
                is_error,
            }]
        }

        "error" => {
            let message = json
                .get("error")
                .and_then(|e| e.get("message"))
                .or_else(|| json.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string();
            vec![RuntimeEvent::Error { message }]
        }

        _ => vec![],
    }
}

/// The `message.content` array of an assistant or user event.
fn content_blocks(json: &serde_json::Value) -> Vec<serde_json::Value> {
    json.get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_array())
        .cloned()
        .unwrap_or_default()
}

/// Parse a line of output, falling back to plain text for non-JSON lines.
fn parse_output_line(line: &str) -> Vec<RuntimeEvent> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return vec![];
    }

    if trimmed.starts_with('{') {
        let events = parse_stream_json(trimmed);
        if !events.is_empty() {
            return events;
        }
    }

    vec![RuntimeEvent::AssistantText {
        content: line.to_string(),
    }]
}
