//! Slash command handlers
//!
//! Each handler validates the shared secret token, answers the original
//! HTTP request immediately with a fixed plaintext message, and hands the
//! actual work to a background task. Everything that happens after the
//! acknowledgement is reported through the response URL.

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{error, info};

use tb_core::models::Team;
use tb_gateway::TeamClient;

use crate::error::Result;
use crate::resolver::SlackNameResolver;
use crate::responder::DelayedResponder;
use crate::types::{RichMessage, SlashCommandPayload};

/// Sent when the slash command token does not match the configured secret
pub const SORRY_MESSAGE: &str = "Sorry! You're not lucky enough to use our slack command";

/// Immediate acknowledgement for the activate-team command
pub const ACTIVATE_TEAM_MESSAGE: &str = "Thanks, Activate Team job started!";

/// Shared state for the slash-command handlers
#[derive(Clone)]
pub struct AppState {
    pub slash_command_token: String,
    pub teams: Arc<dyn TeamClient>,
    pub resolver: Arc<SlackNameResolver>,
    pub responder: DelayedResponder,
}

/// Handle the activate-team slash command
///
/// Responds `200` synchronously in both the rejected and the accepted
/// case; the downstream call and its outcome are delivered out of band.
pub async fn activate_team(
    State(state): State<AppState>,
    Form(payload): Form<SlashCommandPayload>,
) -> impl IntoResponse {
    if payload.token != state.slash_command_token {
        info!(
            "Rejected 'Activate team' command from user '{}': token mismatch",
            payload.user_name
        );
        return (StatusCode::OK, SORRY_MESSAGE);
    }

    info!(
        "'Activate team' command received from user '{}' with text '{}'",
        payload.user_name, payload.text
    );

    tokio::spawn(process_activate_team(state, payload));

    (StatusCode::OK, ACTIVATE_TEAM_MESSAGE)
}

/// `/teams/deactivate` — not implemented yet
pub async fn deactivate_team(
    State(_state): State<AppState>,
    Form(_payload): Form<SlashCommandPayload>,
) -> impl IntoResponse {
    StatusCode::OK
}

/// `/team` — not implemented yet
pub async fn get_team(
    State(_state): State<AppState>,
    Form(_payload): Form<SlashCommandPayload>,
) -> impl IntoResponse {
    StatusCode::OK
}

/// `/myteam` — not implemented yet
pub async fn get_my_team(
    State(_state): State<AppState>,
    Form(_payload): Form<SlashCommandPayload>,
) -> impl IntoResponse {
    StatusCode::OK
}

/// Run the activation downstream call and deliver the outcome to the
/// response URL.
async fn process_activate_team(state: AppState, payload: SlashCommandPayload) {
    let message = match run_activation(&state, &payload.text).await {
        Ok(team) => {
            info!(
                "Team activated for text '{}' with members {:?}",
                payload.text, team.members
            );
            RichMessage::new(format!("Thanks, new Team for '{}' activated", payload.text))
        }
        Err(e) => {
            error!("'Activate team' command failed: {}", e);
            RichMessage::new(state.resolver.humanize_error_message(&e.to_string()).await)
        }
    };

    if let Err(e) = state.responder.send(&payload.response_url, &message).await {
        error!(
            "Failed to send delayed response to '{}': {}",
            payload.response_url, e
        );
    }
}

async fn run_activation(state: &AppState, text: &str) -> Result<Team> {
    let members = state.resolver.uuids_from_text(text).await?;
    let team = state.teams.activate_team(&members).await?;
    Ok(team)
}
