//! SQLite persistence for Warden
//!
//! Owns the relational schema (servers, matches, match reminders, command
//! logs) and every query the bot and the web dashboard run against it.

pub mod models;
pub mod store;

pub use models::{
    CommandCount, CommandLog, DailyActivity, Match, NewCommandLog, NewMatch, Server, ServerStats,
    UpcomingMatch,
};
pub use store::Store;
