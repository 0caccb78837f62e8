//! tb-bot: Team Slackbot Main Binary
//!
//! Receives Slack slash commands and relays team activation to the
//! downstream Teams/Users services.
//!
//! Usage:
//!   tb-bot           - Start the slash-command webhook server
//!   tb-bot --help    - Show help

use std::sync::Arc;

use tb_core::Config;
use tb_gateway::{RestTeamClient, RestUserClient};
use tb_slack::WebhookServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--version" | "-v" => {
                println!("tb-bot {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {}
        }
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting team-slackbot...");
    tracing::info!("Gateway: {}", config.gateway.base_url);

    let teams = Arc::new(RestTeamClient::new(&config.gateway)?);
    let users = Arc::new(RestUserClient::new(&config.gateway)?);

    let server = WebhookServer::new(&config, teams, users)?;
    server.start().await?;

    Ok(())
}

/// Print help message
fn print_help() {
    println!("tb-bot - Team Slackbot slash-command relay");
    println!();
    println!("Usage:");
    println!("  tb-bot           Start the slash-command webhook server");
    println!("  tb-bot --help    Show this help message");
    println!("  tb-bot --version Show version");
    println!();
    println!("Environment Variables:");
    println!("  SLACK_SLASH_COMMAND_TOKEN  Shared secret token (required)");
    println!("  GATEWAY_BASE_URL           Downstream gateway base URL");
    println!("  SERVER_PORT                Webhook server port (default: 8100)");
}
