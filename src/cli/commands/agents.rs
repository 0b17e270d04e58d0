//! The `agents` command: show the delegate roster a session would get.

use anyhow::Result;
use clap::Args;
use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::output::{output, truncate, CommandOutput};
use crate::domain::models::{ModelTarget, SecuritySettings};
use crate::services::agent_registry::{build_agent_definitions, uncovered_tools};
use crate::services::ModelRouter;

#[derive(Args, Debug)]
pub struct AgentsArgs {}

#[derive(Debug, Serialize)]
pub struct AgentRow {
    pub name: String,
    pub model: String,
    pub tools: usize,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct AgentsOutput {
    pub orchestrator_model: String,
    pub agents: Vec<AgentRow>,
    /// Tools an agent names that the permission allow list would not
    /// cover. Should always be empty; shown loudly when it is not.
    pub uncovered_tools: Vec<String>,
}

impl CommandOutput for AgentsOutput {
    fn to_human(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Agent").add_attribute(Attribute::Bold),
                Cell::new("Model").add_attribute(Attribute::Bold),
                Cell::new("Tools").add_attribute(Attribute::Bold),
                Cell::new("Description").add_attribute(Attribute::Bold),
            ]);

        for agent in &self.agents {
            table.add_row(vec![
                Cell::new(&agent.name),
                Cell::new(&agent.model),
                Cell::new(agent.tools),
                Cell::new(truncate(&agent.description, 60)),
            ]);
        }

        let mut lines = vec![
            format!("Orchestrator model: {}", self.orchestrator_model),
            table.to_string(),
        ];
        if !self.uncovered_tools.is_empty() {
            lines.push(format!(
                "Warning: tools not covered by the permission allow list: {}",
                self.uncovered_tools.join(", ")
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: AgentsArgs, json_mode: bool) -> Result<()> {
    let router = ModelRouter::from_env();
    let agents = build_agent_definitions(&router);
    let settings = SecuritySettings::standard(&super::run::gate_command());

    let out = AgentsOutput {
        orchestrator_model: router.resolve(ModelTarget::Orchestrator).to_string(),
        agents: agents
            .iter()
            .map(|(name, agent)| AgentRow {
                name: name.clone(),
                model: agent.model.to_string(),
                tools: agent.tools.len(),
                description: agent.description.clone(),
            })
            .collect(),
        uncovered_tools: uncovered_tools(&agents, &settings),
    };
    output(&out, json_mode);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_table_lists_every_delegate() {
        let router = ModelRouter::default();
        let agents = build_agent_definitions(&router);
        let settings = SecuritySettings::standard("foreman hook pre-tool-use");

        let out = AgentsOutput {
            orchestrator_model: router.resolve(ModelTarget::Orchestrator).to_string(),
            agents: agents
                .iter()
                .map(|(name, agent)| AgentRow {
                    name: name.clone(),
                    model: agent.model.to_string(),
                    tools: agent.tools.len(),
                    description: agent.description.clone(),
                })
                .collect(),
            uncovered_tools: uncovered_tools(&agents, &settings),
        };

        let human = out.to_human();
        for name in ["linear", "github", "slack", "coding"] {
            assert!(human.contains(name), "roster should list {name}");
        }
        assert!(human.contains("Orchestrator model: haiku"));
        assert!(!human.contains("Warning"));
    }
}
