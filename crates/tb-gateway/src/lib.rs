//! tb-gateway: Downstream service clients for Team Slackbot
//!
//! Typed HTTP clients for the Teams and Users microservices behind the
//! gateway, plus the mapping of downstream error bodies into [`ApiError`].
//!
//! [`ApiError`]: tb_core::ApiError

pub mod error;
pub mod teams;
pub mod users;

pub use error::{GatewayError, Result, api_error_from_body};
pub use teams::{RestTeamClient, TeamClient};
pub use users::{RestUserClient, UserClient};
