//! Arcade MCP gateway configuration.
//!
//! The gateway serves the Linear, GitHub, and Slack tools over HTTP.
//! Connection settings come from the environment and are validated before
//! any filesystem mutation, so a misconfigured process never leaves a
//! half-initialized workspace behind.

use std::collections::BTreeMap;
use std::env;

use crate::domain::errors::{HarnessError, HarnessResult};
use crate::domain::models::McpServerConfig;

/// API key variable, required.
pub const API_KEY_VAR: &str = "ARCADE_API_KEY";

/// Gateway user id variable, required.
pub const USER_ID_VAR: &str = "ARCADE_USER_ID";

/// Gateway URL override variable, optional.
pub const GATEWAY_URL_VAR: &str = "ARCADE_GATEWAY_URL";

const DEFAULT_GATEWAY_URL: &str = "https://api.arcade.dev/v1/mcps/default";

/// Connection settings for the Arcade tool gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcadeConfig {
    /// Bearer token for the gateway.
    pub api_key: String,
    /// Account the tool calls act as.
    pub user_id: String,
    /// Gateway endpoint.
    pub url: String,
}

impl ArcadeConfig {
    /// Read and validate gateway settings from the environment.
    pub fn from_env() -> HarnessResult<Self> {
        let api_key = require(API_KEY_VAR)?;
        let user_id = require(USER_ID_VAR)?;
        let url = env::var(GATEWAY_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
        Ok(Self {
            api_key,
            user_id,
            url,
        })
    }

    /// MCP server entry for the runtime's connection map.
    pub fn to_server_config(&self) -> McpServerConfig {
        let mut headers = BTreeMap::new();
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        );
        headers.insert("Arcade-User-Id".to_string(), self.user_id.clone());
        McpServerConfig::http(self.url.clone(), headers)
    }
}

fn require(variable: &str) -> HarnessResult<String> {
    env::var(variable)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| HarnessError::GatewayNotConfigured {
            variable: variable.to_string(),
        })
}
