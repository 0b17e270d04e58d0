//! Prompt templates and orchestrator task messages.
//!
//! Templates live in the shipped prompts directory; a missing template is
//! a fatal startup condition since agents cannot operate without their
//! instructions. The two task builders are data, not logic: they spell
//! out the delegation sequence the orchestrator must follow, including
//! the verification and evidence rules that exist only as instructions.

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::domain::errors::{HarnessError, HarnessResult};
use crate::domain::models::AgentRole;

/// Filename of the application spec copied into each project workspace.
pub const APP_SPEC_FILE: &str = "app_spec.txt";

/// Stem of the orchestrator's full-instruction template.
pub const ORCHESTRATOR_PROMPT_STEM: &str = "orchestrator_prompt";

/// Loads prompt templates from the shipped prompts directory.
#[derive(Debug, Clone)]
pub struct PromptStore {
    dir: PathBuf,
}

impl PromptStore {
    /// Store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory templates are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the template for `name` (without extension).
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.md"))
    }

    /// Path of the shipped application spec.
    pub fn spec_path(&self) -> PathBuf {
        self.dir.join(APP_SPEC_FILE)
    }

    /// Stems of every template a complete installation ships: the
    /// orchestrator's instructions plus one file per delegate role.
    pub fn expected_templates() -> Vec<&'static str> {
        let mut stems = vec![ORCHESTRATOR_PROMPT_STEM];
        stems.extend(AgentRole::ALL.iter().map(|role| role.prompt_stem()));
        stems
    }

    /// Read one template by name.
    pub async fn load(&self, name: &str) -> HarnessResult<String> {
        let path = self.template_path(name);

        if !path.exists() {
            return Err(HarnessError::PromptNotFound {
                path,
                prompts_dir: self.dir.clone(),
            });
        }

        fs::read_to_string(&path)
            .await
            .map_err(|source| HarnessError::PromptUnreadable { path, source })
    }
}

/// Task message for the first session on a new project.
pub fn initializer_task(project_dir: &Path) -> String {
    format!(
        r#"Initialize a new project in: {project_dir}

This is the FIRST session. The project has not been set up yet.

## INITIALIZATION SEQUENCE

### Step 1: Set Up Linear Project
Delegate to `linear` agent:
"Read ./app_spec.txt to understand what we're building. Then:
1. Create a Linear project with appropriate name
2. Create issues for ALL features from app_spec.txt (with test steps in description)
3. Create a META issue '[META] Project Progress Tracker' for session handoffs
4. Save state to .linear_project.json
5. Create claude-progress.txt with initial project summary
6. Return: project_id, total_issues created, meta_issue_id"

### Step 2: Initialize Git
Delegate to `github` agent:
"Initialize git repository:
1. git init
2. Create README.md with project overview
3. Create init.sh script to start dev server
4. Initial commit with these files + .linear_project.json + claude-progress.txt"

### Step 3: Start First Feature (if time permits)
Get the highest-priority issue details from linear agent, then delegate to `coding` agent:
"Implement this Linear issue:
- ID: [from linear agent]
- Title: [from linear agent]
- Description: [from linear agent]
- Test Steps: [from linear agent]

Requirements:
1. Implement the feature
2. Test via Puppeteer (mandatory)
3. Take screenshot evidence
4. Report: files_changed, screenshot_path, test_results"

### Step 4: Commit Progress
If coding was done, delegate to `github` agent to commit.
Then delegate to `linear` agent to update progress.

## OUTPUT FILES TO CREATE
- .linear_project.json (project state)
- claude-progress.txt (session history for fast reads)
- init.sh (dev server startup)
- README.md (project overview)

Remember: You are the orchestrator. Delegate tasks to specialized agents, don't do the work yourself."#,
        project_dir = project_dir.display()
    )
}

/// Task message for resuming work on an initialized project.
pub fn continuation_task(project_dir: &Path) -> String {
    format!(
        r#"Continue work on the project in: {project_dir}

This is a CONTINUATION session. The project has already been initialized.

## STRICT STARTUP SEQUENCE (follow in order)

### Step 1: Orient
- Run `pwd` to confirm working directory
- Read `claude-progress.txt` for recent session history
- Read `.linear_project.json` for project IDs

### Step 2: Get Status from Linear
Delegate to `linear` agent:
"Read .linear_project.json, then:
1. List all issues and count by status (Done/In Progress/Todo)
2. Check for any In Progress issues (interrupted work = priority)
3. Get the FULL DETAILS of the highest-priority issue to work on
4. Update claude-progress.txt with current status
5. Return the complete issue context: id, title, description, test_steps"

### Step 3: MANDATORY Verification Test (before ANY new work)
Delegate to `coding` agent:
"Run init.sh to start the dev server, then verify 1-2 completed features still work:
1. Navigate to the app via Puppeteer
2. Test a core feature end-to-end
3. Take a screenshot as evidence
4. Report: PASS/FAIL with screenshot path
If ANY verification fails, fix it before new work."

### Step 4: Implement Feature (only after Step 3 passes)
Delegate to `coding` agent with FULL context from Step 2:
"Implement this Linear issue:
- ID: [from linear agent]
- Title: [from linear agent]
- Description: [from linear agent]
- Test Steps: [from linear agent]

Requirements:
1. Implement the feature
2. Test via Puppeteer (mandatory)
3. Take screenshot evidence
4. Report: files_changed, screenshot_path, test_results"

### Step 5: Commit
Delegate to `github` agent:
"Commit changes for [issue title]. Include Linear issue ID in commit message."

### Step 6: Mark Done (only with screenshot evidence)
Delegate to `linear` agent:
"Mark issue [id] as Done. Add comment with:
- Files changed
- Screenshot evidence path
- Test results
Update claude-progress.txt with session summary."

## CRITICAL RULES
- Do NOT skip the verification test in Step 3
- Do NOT mark Done without screenshot evidence from coding agent
- Do NOT start Step 4 if Step 3 fails
- Pass FULL issue context to coding agent (don't make it query Linear)

Remember: You are the orchestrator. Delegate tasks to specialized agents, don't do the work yourself."#,
        project_dir = project_dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_returns_template_content() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("coding_agent_prompt.md"),
            "# Coding Agent\nImplement features.",
        )
        .unwrap();

        let store = PromptStore::new(dir.path());
        let text = store.load("coding_agent_prompt").await.unwrap();
        assert!(text.starts_with("# Coding Agent"));
    }

    #[tokio::test]
    async fn test_missing_template_error_names_path_and_directory() {
        let dir = TempDir::new().unwrap();
        let store = PromptStore::new(dir.path());

        let err = store.load("orchestrator_prompt").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("orchestrator_prompt.md"));
        assert!(message.contains("incomplete installation"));
    }

    #[test]
    fn test_expected_templates_cover_orchestrator_and_all_roles() {
        let stems = PromptStore::expected_templates();
        assert_eq!(stems.len(), 5);
        assert!(stems.contains(&"orchestrator_prompt"));
        assert!(stems.contains(&"coding_agent_prompt"));
    }

    #[test]
    fn test_initializer_task_interpolates_the_project_path() {
        let task = initializer_task(Path::new("/work/demo"));
        assert!(task.starts_with("Initialize a new project in: /work/demo"));
        assert!(task.contains("./app_spec.txt"));
        assert!(task.contains("[META] Project Progress Tracker"));
        assert!(task.contains("claude-progress.txt"));
    }

    #[test]
    fn test_continuation_task_keeps_the_orchestration_contract() {
        let task = continuation_task(Path::new("/work/demo"));
        assert!(task.starts_with("Continue work on the project in: /work/demo"));
        assert!(task.contains("MANDATORY Verification Test (before ANY new work)"));
        assert!(task.contains("Do NOT mark Done without screenshot evidence"));
        assert!(task.contains("Include Linear issue ID in commit message"));
    }
}
