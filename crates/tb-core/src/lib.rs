//! tb-core: Team Slackbot Core Library
//!
//! Shared configuration, error type and domain models for the
//! team-slackbot workspace.

pub mod config;
pub mod error;
pub mod models;

pub use config::{Config, GatewayConfig, ServerConfig, SlackConfig};
pub use error::{Error, Result};
pub use models::{ApiError, Team, User};
