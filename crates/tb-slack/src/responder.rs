//! Delayed response delivery
//!
//! Slack supplies a one-time response URL with every slash command; the
//! outcome of the downstream call is posted there as a rich message after
//! the original HTTP exchange has completed. Failed posts are not retried.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use crate::error::{Result, SlackError};
use crate::types::RichMessage;

/// Posts rich messages to the Slack-provided response URL
#[derive(Debug, Clone)]
pub struct DelayedResponder {
    client: Client,
}

impl DelayedResponder {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(SlackError::Http)?;

        Ok(Self { client })
    }

    /// POST a rich message to the response URL
    pub async fn send(&self, response_url: &str, message: &RichMessage) -> Result<()> {
        debug!("Posting delayed response to '{}'", response_url);

        let response = self
            .client
            .post(response_url)
            .json(message)
            .send()
            .await
            .map_err(SlackError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SlackError::Callback(format!("{} - {}", status, body)));
        }

        info!("Sent delayed response message to slack: '{}'", message.text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_posts_rich_message_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/slack/callback"))
            .and(body_json(json!({"text": "Thanks, new Team for '@john' activated"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let responder = DelayedResponder::new().unwrap();
        let message = RichMessage::new("Thanks, new Team for '@john' activated");

        responder
            .send(&format!("{}/slack/callback", server.uri()), &message)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn send_surfaces_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/slack/callback"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_team"))
            .mount(&server)
            .await;

        let responder = DelayedResponder::new().unwrap();
        let result = responder
            .send(
                &format!("{}/slack/callback", server.uri()),
                &RichMessage::new("hello"),
            )
            .await;

        assert!(matches!(result, Err(SlackError::Callback(_))));
    }
}
