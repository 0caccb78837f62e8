//! Domain models shared across the workspace
//!
//! These mirror the JSON contracts of the downstream Teams and Users
//! microservices. All of them are created per request and discarded once
//! the response has been delivered.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A team as returned by the Teams service: an unordered set of unique
/// member identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub members: BTreeSet<String>,
}

impl Team {
    pub fn new(members: BTreeSet<String>) -> Self {
        Self { members }
    }
}

/// A user as returned by the Users service: a stable identifier paired
/// with the Slack display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    pub uuid: String,
    pub slack: String,
}

/// Structured error body returned by the downstream services on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Duplicate of the HTTP status of the failed response
    pub http_status: u16,
    /// Internal error code of the downstream service
    pub internal_error_code: String,
    /// Message intended for the end user
    pub client_message: String,
    /// Message intended for developers
    pub developer_message: String,
    /// Message of the originating exception
    pub exception_message: String,
    /// Detail error messages, if any
    #[serde(default)]
    pub detail_errors: Vec<String>,
}
