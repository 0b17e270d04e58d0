use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::HarnessConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Runtime binary path cannot be empty")]
    EmptyBinaryPath,

    #[error("Invalid max_turns: {0}. Must be at least 1")]
    InvalidMaxTurns(u32),

    #[error("Asset directory cannot be empty: {0}")]
    EmptyAssetDir(&'static str),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .foreman/config.yaml (project config)
    /// 3. .foreman/local.yaml (project local overrides, optional)
    /// 4. Environment variables (FOREMAN_* prefix, highest priority)
    ///
    /// Configuration is always project-local (pwd/.foreman/) so several
    /// harness checkouts on one machine stay independent.
    pub fn load() -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file(".foreman/config.yaml"))
            .merge(Yaml::file(".foreman/local.yaml"))
            .merge(Env::prefixed("FOREMAN_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<HarnessConfig> {
        let config: HarnessConfig = Figment::new()
            .merge(Serialized::defaults(HarnessConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &HarnessConfig) -> Result<(), ConfigError> {
        if config.runtime.binary_path.trim().is_empty() {
            return Err(ConfigError::EmptyBinaryPath);
        }

        if config.runtime.max_turns == 0 {
            return Err(ConfigError::InvalidMaxTurns(config.runtime.max_turns));
        }

        if config.assets.prompts_dir.trim().is_empty() {
            return Err(ConfigError::EmptyAssetDir("prompts_dir"));
        }

        if config.assets.agents_dir.trim().is_empty() {
            return Err(ConfigError::EmptyAssetDir("agents_dir"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
