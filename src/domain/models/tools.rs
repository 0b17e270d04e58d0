//! Tool name tables for built-in, browser, and gateway tools.
//!
//! MCP tool names follow the runtime's `mcp__<server>__<Tool>` convention.

use super::role::AgentRole;

/// Local file-operation tools granted to every delegate.
pub const FILE_TOOLS: [&str; 4] = ["Read", "Write", "Edit", "Glob"];

/// Shell execution tool, granted to the version-control and coding roles only.
pub const SHELL_TOOL: &str = "Bash";

/// Built-in tools available inside the orchestrator session.
pub const BUILTIN_TOOLS: [&str; 6] = ["Read", "Write", "Edit", "Glob", "Grep", "Bash"];

/// Browser automation tools exposed by the Puppeteer MCP server.
pub const PUPPETEER_TOOLS: [&str; 7] = [
    "mcp__puppeteer__puppeteer_navigate",
    "mcp__puppeteer__puppeteer_screenshot",
    "mcp__puppeteer__puppeteer_click",
    "mcp__puppeteer__puppeteer_fill",
    "mcp__puppeteer__puppeteer_select",
    "mcp__puppeteer__puppeteer_hover",
    "mcp__puppeteer__puppeteer_evaluate",
];

/// Permission scope covering every tool on the Arcade gateway.
pub const ARCADE_TOOLS_SCOPE: &str = "mcp__arcade";

/// Linear issue-tracking tools served through the Arcade gateway.
pub const LINEAR_TOOLS: [&str; 7] = [
    "mcp__arcade__Linear_CreateProject",
    "mcp__arcade__Linear_CreateIssue",
    "mcp__arcade__Linear_UpdateIssue",
    "mcp__arcade__Linear_GetIssue",
    "mcp__arcade__Linear_ListIssues",
    "mcp__arcade__Linear_AddComment",
    "mcp__arcade__Linear_ListTeams",
];

/// GitHub tools served through the Arcade gateway.
pub const GITHUB_TOOLS: [&str; 4] = [
    "mcp__arcade__Github_CreatePullRequest",
    "mcp__arcade__Github_ListPullRequests",
    "mcp__arcade__Github_GetRepository",
    "mcp__arcade__Github_CreateIssueComment",
];

/// Slack tools served through the Arcade gateway.
pub const SLACK_TOOLS: [&str; 3] = [
    "mcp__arcade__Slack_SendMessageToChannel",
    "mcp__arcade__Slack_SendDmToUser",
    "mcp__arcade__Slack_ListChannels",
];

/// Gateway tools for one delegate role. The coding role works locally and
/// through the browser, so it calls no gateway tools.
pub const fn arcade_tools(role: AgentRole) -> &'static [&'static str] {
    match role {
        AgentRole::Linear => &LINEAR_TOOLS,
        AgentRole::Github => &GITHUB_TOOLS,
        AgentRole::Slack => &SLACK_TOOLS,
        AgentRole::Coding => &[],
    }
}
