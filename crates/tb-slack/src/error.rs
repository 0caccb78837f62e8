//! Error types for tb-slack

use thiserror::Error;

/// tb-slack error type
#[derive(Error, Debug)]
pub enum SlackError {
    /// Downstream call failed; displays the user-facing message
    #[error(transparent)]
    Gateway(#[from] tb_gateway::GatewayError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Callback POST failed: {0}")]
    Callback(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for tb-slack
pub type Result<T> = std::result::Result<T, SlackError>;
