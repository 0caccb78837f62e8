//! Configuration management
//!
//! Configuration is resolved in the following order:
//! 1. Environment variables
//! 2. `team-slackbot.toml` configuration file
//! 3. Defaults
//!
//! Inside the configuration file, `${VAR_NAME}` expands to the value of the
//! environment variable of that name.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slack-facing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    /// Shared secret token sent by Slack with every slash command
    pub slash_command_token: String,
}

/// Downstream gateway configuration (Teams and Users services)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway fronting the Teams/Users services
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,

    /// Endpoint for team activation (POST)
    #[serde(default = "default_teams_endpoint")]
    pub activate_team_endpoint: String,

    /// Endpoint for team deactivation (PUT, id appended)
    #[serde(default = "default_teams_endpoint")]
    pub deactivate_team_endpoint: String,

    /// Endpoint for fetching a team (GET, id appended)
    #[serde(default = "default_teams_endpoint")]
    pub get_team_endpoint: String,

    /// Endpoint for batch user lookup by Slack name (POST)
    #[serde(default = "default_users_by_slack_names_endpoint")]
    pub users_by_slack_names_endpoint: String,

    /// Endpoint for batch user lookup by identifier (POST)
    #[serde(default = "default_users_by_uuids_endpoint")]
    pub users_by_uuids_endpoint: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_base_url(),
            activate_team_endpoint: default_teams_endpoint(),
            deactivate_team_endpoint: default_teams_endpoint(),
            get_team_endpoint: default_teams_endpoint(),
            users_by_slack_names_endpoint: default_users_by_slack_names_endpoint(),
            users_by_uuids_endpoint: default_users_by_uuids_endpoint(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the webhook server listens on
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

/// Main configuration for team-slackbot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Slack configuration
    pub slack: SlackConfig,

    /// Downstream gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_gateway_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_teams_endpoint() -> String {
    "/v1/teams".to_string()
}

fn default_users_by_slack_names_endpoint() -> String {
    "/v1/users/usersBySlackNames".to_string()
}

fn default_users_by_uuids_endpoint() -> String {
    "/v1/users/usersByUuids".to_string()
}

fn default_server_port() -> u16 {
    8100
}

impl Config {
    /// Load configuration from the default locations
    ///
    /// Tries `./team-slackbot.toml` first, then falls back to environment
    /// variables only.
    pub fn load() -> Result<Self> {
        if Path::new("team-slackbot.toml").exists() {
            return Self::from_toml_file("team-slackbot.toml");
        }

        Self::from_env()
    }

    /// Load configuration from a TOML file
    ///
    /// `${VAR_NAME}` placeholders in the file are expanded from the
    /// environment before parsing. Environment variables take precedence
    /// over file values afterwards.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::expand_env_vars(content);

        let mut config: Config = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        let slash_command_token = std::env::var("SLACK_SLASH_COMMAND_TOKEN")
            .map_err(|_| Error::Config("SLACK_SLASH_COMMAND_TOKEN not set".to_string()))?;

        let mut config = Config {
            slack: SlackConfig {
                slash_command_token,
            },
            gateway: GatewayConfig::default(),
            server: ServerConfig::default(),
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Override file values with environment variables where set
    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("SLACK_SLASH_COMMAND_TOKEN") {
            self.slack.slash_command_token = token;
        }
        if let Ok(url) = std::env::var("GATEWAY_BASE_URL") {
            self.gateway.base_url = url;
        }
        if let Ok(port) = std::env::var("SERVER_PORT")
            && let Ok(port) = port.parse()
        {
            self.server.port = port;
        }
    }

    /// Expand `${VAR_NAME}` placeholders from the environment
    ///
    /// Unknown variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(start) = rest.find("${") {
            result.push_str(&rest[..start]);
            match rest[start + 2..].find('}') {
                Some(end) => {
                    let var_name = &rest[start + 2..start + 2 + end];
                    if let Ok(env_value) = std::env::var(var_name) {
                        result.push_str(&env_value);
                    }
                    rest = &rest[start + 2 + end + 1..];
                }
                None => {
                    result.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        result.push_str(rest);
        result
    }
}
