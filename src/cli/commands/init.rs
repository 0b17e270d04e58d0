//! The `init` command: prepare a project workspace without running.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{HarnessConfig, SecuritySettings};
use crate::infrastructure::prompts::PromptStore;
use crate::infrastructure::workspace::Workspace;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory to prepare (created if missing)
    pub project_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub project_dir: String,
    pub spec_copied: bool,
    pub prompts_copied: usize,
    pub agents_copied: usize,
    pub settings_path: String,
    pub resumed: bool,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        let spec = if self.spec_copied {
            "copied"
        } else {
            "already present, kept"
        };
        let mut lines = vec![
            format!("Workspace ready: {}", self.project_dir),
            format!("  App spec: {spec}"),
            format!("  Prompt templates: {}", self.prompts_copied),
            format!("  Agent definitions: {}", self.agents_copied),
            format!("  Security settings: {}", self.settings_path),
        ];
        if self.resumed {
            lines
                .push("  A previous session already ran here; 'run' will continue it.".to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: InitArgs, config: HarnessConfig, json_mode: bool) -> Result<()> {
    Workspace::new(&args.project_dir).ensure_project_dir().await?;
    let project_dir = args.project_dir.canonicalize().with_context(|| {
        format!(
            "Failed to resolve project directory {}",
            args.project_dir.display()
        )
    })?;

    let workspace = Workspace::new(&project_dir);
    let store = PromptStore::new(&config.assets.prompts_dir);
    let settings = SecuritySettings::standard(&super::run::gate_command());

    let summary = workspace
        .bootstrap(&store, Path::new(&config.assets.agents_dir), &settings)
        .await?;

    let out = InitOutput {
        project_dir: project_dir.display().to_string(),
        spec_copied: summary.spec_copied,
        prompts_copied: summary.prompts_copied,
        agents_copied: summary.agents_copied,
        settings_path: summary.settings_path.display().to_string(),
        resumed: summary.resumed,
    };
    output(&out, json_mode);

    Ok(())
}
