//! Error types for tb-core

use thiserror::Error;

/// Main error type for tb-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for tb-core
pub type Result<T> = std::result::Result<T, Error>;
