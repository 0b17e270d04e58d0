//! The `doctor` command: verify the installation before a session.
//!
//! Runs the same preconditions a session launch would hit, but reports
//! all of them at once instead of failing on the first.

use std::path::Path;

use anyhow::Result;
use clap::Args;
use console::style;
use serde::Serialize;
use tokio::fs;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{AgentDefinition, HarnessConfig, ModelTarget};
use crate::infrastructure::prompts::PromptStore;
use crate::infrastructure::runtime::ClaudeRuntime;
use crate::services::{ArcadeConfig, ModelRouter};

#[derive(Args, Debug)]
pub struct DoctorArgs {}

#[derive(Debug, Serialize)]
pub struct DoctorCheck {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct ModelAssignment {
    pub target: String,
    pub model: String,
    pub overridden: bool,
}

#[derive(Debug, Serialize)]
pub struct DoctorOutput {
    pub checks: Vec<DoctorCheck>,
    pub models: Vec<ModelAssignment>,
    pub ok: bool,
}

impl CommandOutput for DoctorOutput {
    fn to_human(&self) -> String {
        let mut lines = vec!["Installation checks:".to_string()];
        for check in &self.checks {
            let mark = if check.ok {
                style("✓").green()
            } else {
                style("✗").red()
            };
            lines.push(format!("  {mark} {}: {}", check.name, check.detail));
        }

        lines.push("\nModel assignment:".to_string());
        for assignment in &self.models {
            let source = if assignment.overridden {
                "override"
            } else {
                "default"
            };
            lines.push(format!(
                "  {:<14} {:<8} ({source})",
                assignment.target, assignment.model
            ));
        }

        let failed = self.checks.iter().filter(|c| !c.ok).count();
        lines.push(if failed == 0 {
            "\nAll checks passed.".to_string()
        } else {
            format!("\n{failed} check(s) failed.")
        });
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: DoctorArgs, config: HarnessConfig, json_mode: bool) -> Result<()> {
    let mut checks = Vec::new();

    let store = PromptStore::new(&config.assets.prompts_dir);
    checks.push(check_prompt_templates(&store));
    checks.push(check_spec_template(&store));
    checks.push(check_agent_definitions(&config).await);
    checks.push(check_gateway());
    checks.push(check_runtime(&config).await);

    let router = ModelRouter::from_env();
    let models = ModelTarget::ALL
        .iter()
        .map(|&target| ModelAssignment {
            target: target.to_string(),
            model: router.resolve(target).to_string(),
            overridden: router.raw_override(target).is_some(),
        })
        .collect();

    let ok = checks.iter().all(|c| c.ok);
    let out = DoctorOutput { checks, models, ok };
    output(&out, json_mode);

    if !ok {
        anyhow::bail!("installation is not ready");
    }
    Ok(())
}

fn check_prompt_templates(store: &PromptStore) -> DoctorCheck {
    let missing: Vec<&str> = PromptStore::expected_templates()
        .into_iter()
        .filter(|stem| !store.template_path(stem).exists())
        .collect();

    if missing.is_empty() {
        DoctorCheck {
            name: "prompt templates".to_string(),
            ok: true,
            detail: format!(
                "{} templates in {}",
                PromptStore::expected_templates().len(),
                store.dir().display()
            ),
        }
    } else {
        DoctorCheck {
            name: "prompt templates".to_string(),
            ok: false,
            detail: format!("missing: {}", missing.join(", ")),
        }
    }
}

fn check_spec_template(store: &PromptStore) -> DoctorCheck {
    let path = store.spec_path();
    DoctorCheck {
        name: "app spec template".to_string(),
        ok: path.exists(),
        detail: path.display().to_string(),
    }
}

async fn check_agent_definitions(config: &HarnessConfig) -> DoctorCheck {
    let name = "agent definitions".to_string();
    let dir = Path::new(&config.assets.agents_dir);
    if !dir.is_dir() {
        return DoctorCheck {
            name,
            ok: false,
            detail: format!("directory not found: {}", dir.display()),
        };
    }

    let mut valid = 0usize;
    let mut problems = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) => {
            return DoctorCheck {
                name,
                ok: false,
                detail: format!("unreadable directory {}: {e}", dir.display()),
            };
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if !path.extension().is_some_and(|ext| ext == "md") {
            continue;
        }
        match fs::read_to_string(&path).await {
            Ok(content) => match AgentDefinition::parse(&content) {
                Ok(_) => valid += 1,
                Err(reason) => problems.push(format!("{}: {reason}", path.display())),
            },
            Err(e) => problems.push(format!("{}: {e}", path.display())),
        }
    }

    if !problems.is_empty() {
        DoctorCheck {
            name,
            ok: false,
            detail: problems.join("; "),
        }
    } else if valid == 0 {
        DoctorCheck {
            name,
            ok: false,
            detail: format!("no .md agent files in {}", dir.display()),
        }
    } else {
        DoctorCheck {
            name,
            ok: true,
            detail: format!("{valid} valid"),
        }
    }
}

fn check_gateway() -> DoctorCheck {
    match ArcadeConfig::from_env() {
        Ok(arcade) => DoctorCheck {
            name: "Arcade gateway".to_string(),
            ok: true,
            detail: arcade.url.clone(),
        },
        Err(e) => DoctorCheck {
            name: "Arcade gateway".to_string(),
            ok: false,
            detail: e.to_string().lines().next().unwrap_or("not configured").to_string(),
        },
    }
}

async fn check_runtime(config: &HarnessConfig) -> DoctorCheck {
    let runtime = ClaudeRuntime::new(config.runtime.clone());
    match runtime.version().await {
        Some(version) => DoctorCheck {
            name: "runtime binary".to_string(),
            ok: true,
            detail: version,
        },
        None => DoctorCheck {
            name: "runtime binary".to_string(),
            ok: false,
            detail: format!("'{}' not found on PATH", config.runtime.binary_path),
        },
    }
}
