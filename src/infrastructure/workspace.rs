//! Project workspace bootstrap.
//!
//! Prepares the directory a coding session runs in: the app spec, the
//! full agent prompt files under `.agent_prompts/`, the agent definition
//! files under `.claude/agents/`, and the security settings file the
//! runtime loads. All steps are idempotent so a continuation session can
//! re-run the bootstrap safely.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::models::{AgentDefinition, SecuritySettings};
use crate::domain::{HarnessError, HarnessResult};
use crate::infrastructure::prompts::{PromptStore, APP_SPEC_FILE};
use crate::services::agent_registry::AGENT_PROMPTS_DIR;

/// Marker file the agent writes at the end of its first session. Its
/// presence distinguishes a continuation run from a fresh start.
pub const PROGRESS_FILE: &str = "claude-progress.txt";

/// Subdirectory (relative to the project) holding agent definition files.
pub const AGENT_DEFINITIONS_DIR: &str = ".claude/agents";

/// What the bootstrap did, for reporting back to the user.
#[derive(Debug, Clone)]
pub struct BootstrapSummary {
    /// False when the spec was already present and left untouched.
    pub spec_copied: bool,
    pub prompts_copied: usize,
    pub agents_copied: usize,
    pub settings_path: PathBuf,
    /// True when a previous session left a progress file behind.
    pub resumed: bool,
}

/// A project directory that sessions run in.
#[derive(Debug, Clone)]
pub struct Workspace {
    project_dir: PathBuf,
}

impl Workspace {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn settings_path(&self) -> PathBuf {
        self.project_dir.join(SecuritySettings::FILE_NAME)
    }

    pub fn spec_path(&self) -> PathBuf {
        self.project_dir.join(APP_SPEC_FILE)
    }

    pub fn progress_path(&self) -> PathBuf {
        self.project_dir.join(PROGRESS_FILE)
    }

    /// Whether a previous session already ran here.
    pub fn is_initialized(&self) -> bool {
        self.progress_path().exists()
    }

    /// Run the full bootstrap sequence for a session.
    pub async fn bootstrap(
        &self,
        store: &PromptStore,
        agents_dir: &Path,
        settings: &SecuritySettings,
    ) -> HarnessResult<BootstrapSummary> {
        let resumed = self.is_initialized();

        self.ensure_project_dir().await?;
        let spec_copied = self.copy_spec(store).await?;
        let prompts_copied = self.copy_agent_prompts(store).await?;
        let agents_copied = self.copy_agent_definitions(agents_dir).await?;
        let settings_path = self.write_settings(settings).await?;

        tracing::debug!(
            project_dir = %self.project_dir.display(),
            spec_copied,
            prompts_copied,
            agents_copied,
            resumed,
            "workspace bootstrap complete"
        );

        Ok(BootstrapSummary {
            spec_copied,
            prompts_copied,
            agents_copied,
            settings_path,
            resumed,
        })
    }

    /// Create the project directory if it does not exist yet.
    pub async fn ensure_project_dir(&self) -> HarnessResult<()> {
        fs::create_dir_all(&self.project_dir)
            .await
            .map_err(|source| HarnessError::WorkspaceIo {
                path: self.project_dir.clone(),
                source,
            })
    }

    /// Copy the app spec into the project root, never overwriting.
    ///
    /// Returns `true` when the file was copied, `false` when a spec was
    /// already present from an earlier session.
    pub async fn copy_spec(&self, store: &PromptStore) -> HarnessResult<bool> {
        let src = store.spec_path();
        let dest = self.spec_path();

        if dest.exists() {
            tracing::debug!(path = %dest.display(), "spec already present, keeping it");
            return Ok(false);
        }
        if !src.exists() {
            return Err(HarnessError::SpecTemplateMissing(src));
        }

        copy_file(&src, &dest).await?;
        Ok(true)
    }

    /// Mirror the full prompt files into `<project>/.agent_prompts/`.
    ///
    /// The system prompts passed to the runtime only carry short
    /// self-loading stubs; each stub reads its real instructions from
    /// this directory, so the orchestrator template and every role
    /// template must land here before the session starts.
    pub async fn copy_agent_prompts(&self, store: &PromptStore) -> HarnessResult<usize> {
        let dest_dir = self.project_dir.join(AGENT_PROMPTS_DIR);
        fs::create_dir_all(&dest_dir)
            .await
            .map_err(|source| HarnessError::WorkspaceIo {
                path: dest_dir.clone(),
                source,
            })?;

        let mut copied = 0;
        for stem in PromptStore::expected_templates() {
            let src = store.template_path(stem);
            if !src.exists() {
                return Err(HarnessError::PromptNotFound {
                    path: src,
                    prompts_dir: store.dir().to_path_buf(),
                });
            }
            copy_file(&src, &dest_dir.join(format!("{stem}.md"))).await?;
            copied += 1;
        }

        Ok(copied)
    }

    /// Copy every `.md` agent definition into `<project>/.claude/agents/`.
    ///
    /// Each file must parse as a well-formed definition (YAML frontmatter
    /// plus a body) before it is copied; a malformed template would
    /// otherwise surface as confusing runtime behavior mid-session.
    /// Returns how many files were copied. An empty or missing source
    /// directory is an installation defect, not a soft condition.
    pub async fn copy_agent_definitions(&self, agents_dir: &Path) -> HarnessResult<usize> {
        if !agents_dir.is_dir() {
            return Err(HarnessError::AgentTemplatesMissing(agents_dir.to_path_buf()));
        }

        let dest_dir = self.project_dir.join(AGENT_DEFINITIONS_DIR);
        fs::create_dir_all(&dest_dir)
            .await
            .map_err(|source| HarnessError::WorkspaceIo {
                path: dest_dir.clone(),
                source,
            })?;

        let mut entries =
            fs::read_dir(agents_dir)
                .await
                .map_err(|source| HarnessError::WorkspaceIo {
                    path: agents_dir.to_path_buf(),
                    source,
                })?;

        let mut copied = 0;
        while let Some(entry) =
            entries
                .next_entry()
                .await
                .map_err(|source| HarnessError::WorkspaceIo {
                    path: agents_dir.to_path_buf(),
                    source,
                })?
        {
            let src = entry.path();
            if !src.extension().is_some_and(|ext| ext == "md") {
                continue;
            }
            let Some(file_name) = src.file_name() else {
                continue;
            };

            let content =
                fs::read_to_string(&src)
                    .await
                    .map_err(|source| HarnessError::WorkspaceIo {
                        path: src.clone(),
                        source,
                    })?;
            AgentDefinition::parse(&content).map_err(|reason| {
                HarnessError::InvalidAgentDefinition {
                    path: src.clone(),
                    reason,
                }
            })?;

            copy_file(&src, &dest_dir.join(file_name)).await?;
            copied += 1;
        }

        if copied == 0 {
            return Err(HarnessError::NoAgentTemplates(agents_dir.to_path_buf()));
        }

        Ok(copied)
    }

    /// Write the security settings file the runtime is pointed at.
    pub async fn write_settings(&self, settings: &SecuritySettings) -> HarnessResult<PathBuf> {
        let path = self.settings_path();
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| HarnessError::Serialization(e.to_string()))?;

        fs::write(&path, format!("{content}\n"))
            .await
            .map_err(|source| HarnessError::SettingsWrite {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(path = %path.display(), "wrote security settings");
        Ok(path)
    }

    /// Read the settings file back, e.g. to verify an existing workspace.
    pub async fn read_settings(&self) -> HarnessResult<SecuritySettings> {
        let path = self.settings_path();
        let content =
            fs::read_to_string(&path)
                .await
                .map_err(|source| HarnessError::WorkspaceIo {
                    path: path.clone(),
                    source,
                })?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }
}

async fn copy_file(src: &Path, dest: &Path) -> HarnessResult<()> {
    fs::copy(src, dest)
        .await
        .map_err(|source| HarnessError::CopyFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            source,
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seed_prompts(dir: &Path) {
        fs::write(dir.join(APP_SPEC_FILE), "Build a todo app.")
            .await
            .unwrap();
        for stem in [
            "orchestrator_prompt",
            "linear_agent_prompt",
            "github_agent_prompt",
            "slack_agent_prompt",
            "coding_agent_prompt",
        ] {
            fs::write(dir.join(format!("{stem}.md")), format!("# {stem}"))
                .await
                .unwrap();
        }
    }

    async fn seed_agents(dir: &Path) {
        for name in ["linear", "github", "slack", "coding"] {
            fs::write(
                dir.join(format!("{name}.md")),
                format!("---\nname: {name}-agent\ndescription: {name}\n---\n\nBody."),
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_bootstrap_copies_everything() {
        let assets = TempDir::new().unwrap();
        seed_prompts(assets.path()).await;
        let agents_dir = assets.path().join("agents");
        fs::create_dir_all(&agents_dir).await.unwrap();
        seed_agents(&agents_dir).await;

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path().join("my-app"));
        let store = PromptStore::new(assets.path());
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");

        let summary = workspace
            .bootstrap(&store, &agents_dir, &settings)
            .await
            .unwrap();

        assert!(summary.spec_copied);
        assert_eq!(summary.prompts_copied, 5);
        assert_eq!(summary.agents_copied, 4);
        assert!(!summary.resumed);
        assert!(workspace.spec_path().exists());
        assert!(workspace.settings_path().exists());
        for stem in [
            "orchestrator_prompt",
            "linear_agent_prompt",
            "github_agent_prompt",
            "slack_agent_prompt",
            "coding_agent_prompt",
        ] {
            assert!(workspace
                .project_dir()
                .join(AGENT_PROMPTS_DIR)
                .join(format!("{stem}.md"))
                .exists());
        }
    }

    #[tokio::test]
    async fn test_copy_spec_never_overwrites() {
        let assets = TempDir::new().unwrap();
        seed_prompts(assets.path()).await;

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());
        let store = PromptStore::new(assets.path());

        assert!(workspace.copy_spec(&store).await.unwrap());
        fs::write(workspace.spec_path(), "edited by agent")
            .await
            .unwrap();

        assert!(!workspace.copy_spec(&store).await.unwrap());
        let content = fs::read_to_string(workspace.spec_path()).await.unwrap();
        assert_eq!(content, "edited by agent");
    }

    #[tokio::test]
    async fn test_copy_spec_missing_template() {
        let assets = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());
        let store = PromptStore::new(assets.path());

        let err = workspace.copy_spec(&store).await.unwrap_err();
        assert!(matches!(err, HarnessError::SpecTemplateMissing(_)));
    }

    #[tokio::test]
    async fn test_copy_agent_prompts_missing_template() {
        let assets = TempDir::new().unwrap();
        // Spec present but no role prompt templates.
        fs::write(assets.path().join(APP_SPEC_FILE), "spec")
            .await
            .unwrap();

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());
        let store = PromptStore::new(assets.path());

        let err = workspace.copy_agent_prompts(&store).await.unwrap_err();
        assert!(matches!(err, HarnessError::PromptNotFound { .. }));
    }

    #[tokio::test]
    async fn test_copy_agent_definitions_counts_md_only() {
        let assets = TempDir::new().unwrap();
        let agents_dir = assets.path().join("agents");
        fs::create_dir_all(&agents_dir).await.unwrap();
        seed_agents(&agents_dir).await;
        fs::write(agents_dir.join("README.txt"), "not an agent")
            .await
            .unwrap();

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());

        let copied = workspace.copy_agent_definitions(&agents_dir).await.unwrap();
        assert_eq!(copied, 4);
        assert!(!workspace
            .project_dir()
            .join(AGENT_DEFINITIONS_DIR)
            .join("README.txt")
            .exists());
    }

    #[tokio::test]
    async fn test_copy_agent_definitions_rejects_malformed_file() {
        let assets = TempDir::new().unwrap();
        let agents_dir = assets.path().join("agents");
        fs::create_dir_all(&agents_dir).await.unwrap();
        fs::write(agents_dir.join("broken.md"), "no frontmatter here")
            .await
            .unwrap();

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());

        let err = workspace
            .copy_agent_definitions(&agents_dir)
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::InvalidAgentDefinition { .. }));
    }

    #[tokio::test]
    async fn test_copy_agent_definitions_empty_dir() {
        let assets = TempDir::new().unwrap();
        let agents_dir = assets.path().join("agents");
        fs::create_dir_all(&agents_dir).await.unwrap();

        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());

        let err = workspace
            .copy_agent_definitions(&agents_dir)
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::NoAgentTemplates(_)));
    }

    #[tokio::test]
    async fn test_copy_agent_definitions_missing_dir() {
        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());

        let err = workspace
            .copy_agent_definitions(Path::new("/nonexistent/agents"))
            .await
            .unwrap_err();
        assert!(matches!(err, HarnessError::AgentTemplatesMissing(_)));
    }

    #[tokio::test]
    async fn test_settings_round_trip() {
        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");

        let path = workspace.write_settings(&settings).await.unwrap();
        let content = fs::read_to_string(&path).await.unwrap();
        assert!(content.ends_with('\n'));

        let loaded = workspace.read_settings().await.unwrap();
        assert_eq!(loaded, settings);
    }

    #[tokio::test]
    async fn test_is_initialized_tracks_progress_file() {
        let project = TempDir::new().unwrap();
        let workspace = Workspace::new(project.path());
        assert!(!workspace.is_initialized());

        fs::write(workspace.progress_path(), "session 1 done")
            .await
            .unwrap();
        assert!(workspace.is_initialized());
    }
}
