//! Slash command handlers for the Warden bot
//!
//! Each handler validates a permission flag, performs a single Discord or
//! store call, replies with a templated embed, and records its invocation in
//! the command log. Labels and times in user-facing embeds go through
//! `warden-i18n`, so a missing translation can never block a command.

pub mod general;
pub mod matches;
pub mod moderation;
pub mod utility;

mod support;

use std::sync::Arc;

use warden_config::Config;
use warden_store::Store;

/// Shared state available to every command through the poise context
#[derive(Debug)]
pub struct Data {
    /// Application configuration
    pub config: Arc<Config>,
    /// Persistent store shared with the web dashboard
    pub store: Arc<Store>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Every command the bot registers, in help-page order
pub fn all_commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        general::ping(),
        general::help(),
        general::serverinfo(),
        general::userinfo(),
        general::avatar(),
        general::eightball(),
        moderation::kick(),
        moderation::ban(),
        moderation::unban(),
        moderation::timeout(),
        moderation::untimeout(),
        moderation::warn(),
        moderation::clear(),
        utility::say(),
        utility::embed(),
        utility::roleinfo(),
        utility::channelinfo(),
        matches::create_match(),
        matches::list_matches(),
        matches::end_match(),
    ]
}
