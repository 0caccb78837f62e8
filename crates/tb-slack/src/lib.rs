//! tb-slack: Slack slash-command surface for Team Slackbot
//!
//! Receives form-encoded slash commands, validates the shared secret
//! token, acknowledges immediately and delivers the outcome of the
//! downstream call through the Slack-provided response URL.

pub mod error;
pub mod handler;
pub mod resolver;
pub mod responder;
pub mod server;
pub mod types;

pub use error::{Result, SlackError};
pub use resolver::SlackNameResolver;
pub use responder::DelayedResponder;
pub use server::WebhookServer;
