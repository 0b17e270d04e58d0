//! Harness configuration structure.

use serde::{Deserialize, Serialize};

/// Main configuration structure for foreman
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HarnessConfig {
    /// External runtime configuration
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Shipped asset locations
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External runtime (claude CLI) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuntimeConfig {
    /// Path to the claude CLI executable
    #[serde(default = "default_binary_path")]
    pub binary_path: String,

    /// Hard cap on conversation turns per session
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Extra flags appended to every runtime invocation
    #[serde(default)]
    pub extra_flags: Vec<String>,
}

fn default_binary_path() -> String {
    "claude".to_string()
}

const fn default_max_turns() -> u32 {
    1000
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            binary_path: default_binary_path(),
            max_turns: default_max_turns(),
            extra_flags: vec![],
        }
    }
}

/// Locations of the shipped prompt and agent templates
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AssetsConfig {
    /// Directory holding prompt templates and the app spec
    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: String,

    /// Directory holding agent definition templates
    #[serde(default = "default_agents_dir")]
    pub agents_dir: String,
}

fn default_prompts_dir() -> String {
    "prompts".to_string()
}

fn default_agents_dir() -> String {
    "agents".to_string()
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            prompts_dir: default_prompts_dir(),
            agents_dir: default_agents_dir(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
