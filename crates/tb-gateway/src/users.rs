//! Users service client
//!
//! Batch lookups by Slack name and by stable identifier. Users the
//! downstream service does not know are simply absent from the result;
//! no local validation is applied.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

use tb_core::config::GatewayConfig;
use tb_core::models::User;

use crate::error::{GatewayError, Result, api_error_from_body};

/// Client contract for the downstream Users service
#[async_trait]
pub trait UserClient: Send + Sync {
    /// Batch lookup by Slack display name
    async fn find_by_slack_names(&self, slack_names: &[String]) -> Result<Vec<User>>;

    /// Batch lookup by stable identifier
    async fn find_by_uuids(&self, uuids: &[String]) -> Result<Vec<User>>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlackNamesRequest<'a> {
    slack_names: &'a [String],
}

#[derive(Debug, Serialize)]
struct UuidsRequest<'a> {
    uuids: &'a [String],
}

/// REST-backed Users client
#[derive(Debug, Clone)]
pub struct RestUserClient {
    client: Client,
    by_slack_names_url: String,
    by_uuids_url: String,
}

impl RestUserClient {
    /// Create a new Users client from the gateway configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(GatewayError::Http)?;

        let base_url = config.base_url.trim_end_matches('/');

        Ok(Self {
            client,
            by_slack_names_url: format!("{}{}", base_url, config.users_by_slack_names_endpoint),
            by_uuids_url: format!("{}{}", base_url, config.users_by_uuids_endpoint),
        })
    }

    async fn read_users(response: reqwest::Response) -> Result<Vec<User>> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Users request failed: {} - {}", status, body);
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
impl UserClient for RestUserClient {
    async fn find_by_slack_names(&self, slack_names: &[String]) -> Result<Vec<User>> {
        debug!("Finding users by slack names: {:?}", slack_names);

        let response = self
            .client
            .post(&self.by_slack_names_url)
            .json(&SlackNamesRequest { slack_names })
            .send()
            .await
            .map_err(GatewayError::Http)?;

        let users = Self::read_users(response).await?;
        debug!("Found {} users by slack names", users.len());
        Ok(users)
    }

    async fn find_by_uuids(&self, uuids: &[String]) -> Result<Vec<User>> {
        debug!("Finding users by uuids: {:?}", uuids);

        let response = self
            .client
            .post(&self.by_uuids_url)
            .json(&UuidsRequest { uuids })
            .send()
            .await
            .map_err(GatewayError::Http)?;

        let users = Self::read_users(response).await?;
        debug!("Found {} users by uuids", users.len());
        Ok(users)
    }
}
