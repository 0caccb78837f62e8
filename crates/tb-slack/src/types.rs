//! Slack wire types

use serde::{Deserialize, Serialize};

/// Form-encoded slash command payload sent by Slack
///
/// Slack sends more fields than these; unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct SlashCommandPayload {
    pub token: String,
    pub user_name: String,
    pub text: String,
    pub response_url: String,
}

/// Rich message posted to the Slack response URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichMessage {
    pub text: String,
}

impl RichMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
