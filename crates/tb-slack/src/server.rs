//! Webhook server
//!
//! axum server exposing the slash-command endpoints.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;
use tower_http::trace::TraceLayer;
use tracing::info;

use tb_core::Config;
use tb_gateway::{TeamClient, UserClient};

use crate::error::{Result, SlackError};
use crate::handler::{self, AppState};
use crate::resolver::SlackNameResolver;
use crate::responder::DelayedResponder;

/// Slash-command webhook server
pub struct WebhookServer {
    addr: SocketAddr,
    state: AppState,
}

impl WebhookServer {
    /// Create a new webhook server
    pub fn new(
        config: &Config,
        teams: Arc<dyn TeamClient>,
        users: Arc<dyn UserClient>,
    ) -> Result<Self> {
        let state = AppState {
            slash_command_token: config.slack.slash_command_token.clone(),
            teams,
            resolver: Arc::new(SlackNameResolver::new(users)),
            responder: DelayedResponder::new()?,
        };

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], config.server.port)),
            state,
        })
    }

    /// Build the command router
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/v1/commands/teams/activate", post(handler::activate_team))
            .route("/v1/commands/teams/deactivate", post(handler::deactivate_team))
            .route("/v1/commands/team", post(handler::get_team))
            .route("/v1/commands/myteam", post(handler::get_my_team))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the webhook server
    pub async fn start(self) -> Result<()> {
        info!("Starting slash-command webhook server on {}", self.addr);

        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| SlackError::Config(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| SlackError::Config(e.to_string()))?;

        Ok(())
    }
}
