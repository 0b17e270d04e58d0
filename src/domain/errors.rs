//! Domain errors for the foreman harness.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling, bootstrapping, or launching a session.
///
/// Every variant aborts startup. A denied shell command is not an error;
/// the gate reports it through the hook response instead.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(
        "Arcade gateway not configured: {variable} is not set\n\
         Set {variable} in the environment or in a .env file before starting a session."
    )]
    GatewayNotConfigured { variable: String },

    #[error(
        "Prompt file not found: {}\nExpected prompts directory: {}\n\
         This may indicate an incomplete installation.",
        path.display(),
        prompts_dir.display()
    )]
    PromptNotFound { path: PathBuf, prompts_dir: PathBuf },

    #[error("Failed to read prompt file {}: {source}\nCheck file permissions.", path.display())]
    PromptUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "App spec template not found: {}\nThis indicates an incomplete installation.",
        .0.display()
    )]
    SpecTemplateMissing(PathBuf),

    #[error(
        "Agent template directory not found: {}\nThis indicates an incomplete installation.",
        .0.display()
    )]
    AgentTemplatesMissing(PathBuf),

    #[error("No agent files found in {}\nExpected .md files defining agents.", .0.display())]
    NoAgentTemplates(PathBuf),

    #[error("Agent definition {} is invalid: {reason}", path.display())]
    InvalidAgentDefinition { path: PathBuf, reason: String },

    #[error(
        "Failed to copy {} to {}: {source}\nCheck disk space and permissions.",
        src.display(),
        dest.display()
    )]
    CopyFailed {
        src: PathBuf,
        dest: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Failed to write security settings to {}: {source}\n\
         Check disk space and file permissions.\n\
         Agent cannot start without security settings.",
        path.display()
    )]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Workspace operation failed at {}: {source}", path.display())]
    WorkspaceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(
        "Failed to launch runtime '{binary}': {source}\n\
         Is the claude CLI installed and on PATH?"
    )]
    RuntimeLaunch {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Runtime session failed: {0}")]
    RuntimeFailed(String),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
