//! CLI interface: argument definitions and command dispatch.

use clap::{Parser, Subcommand};

pub mod commands;
pub mod output;

pub use output::{output, CommandOutput};

#[derive(Parser)]
#[command(name = "foreman")]
#[command(about = "Foreman - multi-agent coding session harness", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare a project workspace without starting a session
    Init(commands::init::InitArgs),

    /// Start or continue a coding session in a project workspace
    Run(commands::run::RunArgs),

    /// Show the agent roster a session would be configured with
    Agents(commands::agents::AgentsArgs),

    /// Check the installation: templates, gateway credentials, runtime
    Doctor(commands::doctor::DoctorArgs),

    /// Runtime hook endpoints (invoked by the runtime, not by hand)
    #[command(subcommand)]
    Hook(commands::hook::HookCommands),
}

/// Print a top-level error and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
