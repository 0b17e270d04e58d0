//! Parser for `.claude/agents/*.md` agent definition files.
//!
//! Definition files use YAML frontmatter + markdown body format:
//! ```markdown
//! ---
//! name: coding-agent
//! description: Implements features and fixes bugs
//! tools:
//!   - Read
//!   - Write
//! model: sonnet
//! ---
//!
//! You are the coding agent...
//! ```
//!
//! The files are copied verbatim into each project workspace; parsing is
//! only used to verify they are well formed before a session depends on
//! them.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct Frontmatter {
    name: String,
    description: String,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    model: Option<String>,
}

/// Parsed representation of an agent definition file.
#[derive(Debug, Clone)]
pub struct AgentDefinition {
    pub name: String,
    pub description: String,
    pub tools: Vec<String>,
    pub model: Option<String>,
    /// The markdown body after the closing `---`.
    pub body: String,
}

impl AgentDefinition {
    /// Parse the content of a `.claude/agents/*.md` file.
    ///
    /// Expected format: YAML frontmatter between `---` markers with at
    /// least `name` and `description`, followed by a non-empty markdown
    /// body.
    pub fn parse(content: &str) -> Result<AgentDefinition, String> {
        let trimmed = content.trim();

        if !trimmed.starts_with("---") {
            return Err("agent definition must start with YAML frontmatter (---)".to_string());
        }

        let after_first = &trimmed[3..];
        let closing_idx = after_first
            .find("\n---")
            .ok_or_else(|| "missing closing --- for YAML frontmatter".to_string())?;

        let yaml_str = after_first[..closing_idx].trim();
        let body = after_first[closing_idx + 4..].trim().to_string();

        let frontmatter: Frontmatter = serde_yaml::from_str(yaml_str)
            .map_err(|e| format!("invalid YAML frontmatter: {e}"))?;

        if frontmatter.name.trim().is_empty() {
            return Err("frontmatter field 'name' is empty".to_string());
        }
        if frontmatter.description.trim().is_empty() {
            return Err("frontmatter field 'description' is empty".to_string());
        }
        if body.is_empty() {
            return Err("agent definition must have a markdown body".to_string());
        }

        Ok(AgentDefinition {
            name: frontmatter.name,
            description: frontmatter.description,
            tools: frontmatter.tools,
            model: frontmatter.model,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = r#"---
name: coding-agent
description: Implements features and fixes bugs
tools:
  - Read
  - Write
model: sonnet
---

You are the coding agent. Build the thing."#;

        let def = AgentDefinition::parse(content).unwrap();
        assert_eq!(def.name, "coding-agent");
        assert_eq!(def.description, "Implements features and fixes bugs");
        assert_eq!(def.tools, vec!["Read", "Write"]);
        assert_eq!(def.model.as_deref(), Some("sonnet"));
        assert_eq!(def.body, "You are the coding agent. Build the thing.");
    }

    #[test]
    fn test_parse_minimal_frontmatter() {
        let content = "---\nname: slack-agent\ndescription: Posts updates\n---\n\nBody text.";
        let def = AgentDefinition::parse(content).unwrap();
        assert_eq!(def.name, "slack-agent");
        assert!(def.tools.is_empty());
        assert!(def.model.is_none());
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        let err = AgentDefinition::parse("Just markdown, no frontmatter.").unwrap_err();
        assert!(err.contains("frontmatter"));
    }

    #[test]
    fn test_parse_missing_description() {
        let content = "---\nname: x\n---\n\nBody.";
        assert!(AgentDefinition::parse(content).is_err());
    }

    #[test]
    fn test_parse_missing_body() {
        let content = "---\nname: x\ndescription: y\n---\n";
        let err = AgentDefinition::parse(content).unwrap_err();
        assert!(err.contains("markdown body"));
    }
}
