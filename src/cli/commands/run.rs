//! The `run` command: bootstrap a workspace and drive one session.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::HarnessConfig;
use crate::infrastructure::prompts::{continuation_task, initializer_task, PromptStore};
use crate::infrastructure::runtime::{ClaudeRuntime, RuntimeEvent};
use crate::infrastructure::workspace::Workspace;
use crate::services::{plan_session, ArcadeConfig, ModelRouter, SessionPlan};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Project directory the session runs in (created if missing)
    pub project_dir: PathBuf,

    /// Override the configured turn limit for this session
    #[arg(long)]
    pub max_turns: Option<u32>,

    /// Run the initializer sequence even if a previous session ran here
    #[arg(long)]
    pub fresh: bool,

    /// Assemble and print the session plan without launching the runtime
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanOutput {
    pub project_dir: String,
    pub session_kind: String,
    pub model: String,
    pub max_turns: u32,
    pub agents: Vec<String>,
    pub mcp_servers: Vec<String>,
    pub settings_path: String,
}

impl CommandOutput for PlanOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Session plan for {}:", self.project_dir),
            format!("  Kind: {}", self.session_kind),
            format!("  Orchestrator model: {}", self.model),
            format!("  Max turns: {}", self.max_turns),
            format!("  Agents: {}", self.agents.join(", ")),
            format!("  MCP servers: {}", self.mcp_servers.join(", ")),
            format!("  Settings: {}", self.settings_path),
        ];
        lines.push("\nDry run: nothing was launched.".to_string());
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct RunOutput {
    pub project_dir: String,
    pub session_kind: String,
    pub success: bool,
    pub session_id: Option<String>,
    pub turns: u32,
    pub duration_secs: i64,
    pub result: Option<String>,
}

impl CommandOutput for RunOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![if self.success {
            "Session complete.".to_string()
        } else {
            "Session finished with errors.".to_string()
        }];
        lines.push(format!("  Kind: {}", self.session_kind));
        if let Some(id) = &self.session_id {
            lines.push(format!("  Session ID: {id}"));
        }
        lines.push(format!("  Turns: {}", self.turns));
        lines.push(format!("  Duration: {}", format_duration(self.duration_secs)));
        if let Some(result) = &self.result {
            lines.push(format!("  Result: {}", truncate(result, 200)));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RunArgs, config: HarnessConfig, json_mode: bool) -> Result<()> {
    // Gateway credentials are required before any filesystem work; a
    // session without the Arcade tools is useless to three of the four
    // delegates.
    let arcade = ArcadeConfig::from_env()?;
    let router = ModelRouter::from_env();

    Workspace::new(&args.project_dir).ensure_project_dir().await?;
    let project_dir = args.project_dir.canonicalize().with_context(|| {
        format!(
            "Failed to resolve project directory {}",
            args.project_dir.display()
        )
    })?;
    let workspace = Workspace::new(&project_dir);

    let max_turns = args.max_turns.unwrap_or(config.runtime.max_turns);
    let plan = plan_session(&project_dir, &router, &arcade, max_turns, &gate_command());

    let resumed = workspace.is_initialized() && !args.fresh;
    let session_kind = if resumed { "continuation" } else { "initializer" };

    if args.dry_run {
        let out = plan_output(&plan, &project_dir, session_kind);
        output(&out, json_mode);
        return Ok(());
    }

    let store = PromptStore::new(&config.assets.prompts_dir);
    workspace
        .bootstrap(&store, Path::new(&config.assets.agents_dir), &plan.settings)
        .await?;

    let task = if resumed {
        continuation_task(&project_dir)
    } else {
        initializer_task(&project_dir)
    };

    if !json_mode {
        println!(
            "Starting {session_kind} session in {} (model {}, max {max_turns} turns)",
            project_dir.display(),
            plan.options.model
        );
    }

    let runtime = ClaudeRuntime::new(config.runtime.clone());
    let outcome = runtime
        .run(&plan.options, &task, |event| {
            if !json_mode {
                print_event(event);
            }
        })
        .await?;

    let out = RunOutput {
        project_dir: project_dir.display().to_string(),
        session_kind: session_kind.to_string(),
        success: outcome.success,
        session_id: outcome.session_id.map(|id| id.to_string()),
        turns: outcome.turns,
        duration_secs: outcome.duration().num_seconds(),
        result: outcome.result,
    };
    output(&out, json_mode);

    Ok(())
}

/// Command line the runtime invokes for the pre-execution gate hook.
///
/// Points back at this binary so the gate and the session always come
/// from the same build.
pub(crate) fn gate_command() -> String {
    std::env::current_exe()
        .map(|exe| format!("{} hook pre-tool-use", exe.display()))
        .unwrap_or_else(|_| "foreman hook pre-tool-use".to_string())
}

fn plan_output(plan: &SessionPlan, project_dir: &Path, kind: &str) -> PlanOutput {
    PlanOutput {
        project_dir: project_dir.display().to_string(),
        session_kind: kind.to_string(),
        model: plan.options.model.to_string(),
        max_turns: plan.options.max_turns,
        agents: plan.options.agents.keys().cloned().collect(),
        mcp_servers: plan.options.mcp_servers.keys().cloned().collect(),
        settings_path: plan.options.settings_path.display().to_string(),
    }
}

fn print_event(event: &RuntimeEvent) {
    match event {
        RuntimeEvent::AssistantText { content } => println!("{content}"),
        RuntimeEvent::ToolStart { name, .. } => {
            println!("{} {name}", style("→").cyan());
        }
        RuntimeEvent::ToolResult {
            id,
            result,
            is_error,
        } if *is_error => {
            println!("{} tool {id}: {}", style("✗").red(), truncate(result, 200));
        }
        RuntimeEvent::ToolResult { .. } => {}
        RuntimeEvent::Status { message } => {
            println!("{}", style(format!("[{message}]")).dim());
        }
        RuntimeEvent::Error { message } => {
            eprintln!("{} {message}", style("error:").red());
        }
        RuntimeEvent::Completed { .. } => {}
    }
}

fn format_duration(total_secs: i64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
