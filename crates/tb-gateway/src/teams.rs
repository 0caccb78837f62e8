//! Teams service client
//!
//! Thin request/response wrapper over the Teams endpoints of the gateway:
//! one awaited call per invocation, no batching, no retries.

use std::collections::BTreeSet;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use tb_core::config::GatewayConfig;
use tb_core::models::Team;

use crate::error::{GatewayError, Result, api_error_from_body};

/// Client contract for the downstream Teams service
#[async_trait]
pub trait TeamClient: Send + Sync {
    /// Activate a new team for the given member identifiers
    async fn activate_team(&self, members: &BTreeSet<String>) -> Result<Team>;

    /// Deactivate the team the given member belongs to
    async fn deactivate_team(&self, id: &str) -> Result<Team>;

    /// Get the team the given member belongs to
    async fn get_team(&self, id: &str) -> Result<Team>;
}

/// Activation request body expected by the Teams service
#[derive(Debug, Serialize)]
struct ActivateTeamRequest<'a> {
    members: &'a BTreeSet<String>,
}

/// REST-backed Teams client
#[derive(Debug, Clone)]
pub struct RestTeamClient {
    client: Client,
    activate_url: String,
    deactivate_url: String,
    get_url: String,
}

impl RestTeamClient {
    /// Create a new Teams client from the gateway configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(GatewayError::Http)?;

        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            activate_url: format!("{}{}", base_url, config.activate_team_endpoint),
            deactivate_url: format!("{}{}", base_url, config.deactivate_team_endpoint),
            get_url: format!("{}{}", base_url, config.get_team_endpoint),
        })
    }

    async fn read_team(response: reqwest::Response) -> Result<Team> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Teams request failed: {} - {}", status, body);
            return Err(GatewayError::Api(api_error_from_body(
                status.as_u16(),
                &body,
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

#[async_trait]
impl TeamClient for RestTeamClient {
    async fn activate_team(&self, members: &BTreeSet<String>) -> Result<Team> {
        debug!("Activating team for {} members", members.len());

        let response = self
            .client
            .post(&self.activate_url)
            .json(&ActivateTeamRequest { members })
            .send()
            .await
            .map_err(GatewayError::Http)?;

        let team = Self::read_team(response).await?;
        debug!("Activated team with members: {:?}", team.members);
        Ok(team)
    }

    async fn deactivate_team(&self, id: &str) -> Result<Team> {
        let url = format!("{}/{}", self.deactivate_url, id);

        debug!("Deactivating team of member: {}", id);

        let response = self
            .client
            .put(&url)
            .send()
            .await
            .map_err(GatewayError::Http)?;

        Self::read_team(response).await
    }

    async fn get_team(&self, id: &str) -> Result<Team> {
        let url = format!("{}/{}", self.get_url, id);

        debug!("Getting team of member: {}", id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(GatewayError::Http)?;

        Self::read_team(response).await
    }
}
