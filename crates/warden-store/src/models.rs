//! Row models and query result shapes

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// A guild the bot has joined
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Server {
    pub id: i64,
    pub guild_id: String,
    pub guild_name: String,
    pub log_channel_id: Option<String>,
    pub activity_channel_id: Option<String>,
    /// JSON array of channel IDs the bot is restricted to, when set
    pub allowed_channels: Option<String>,
    pub joined_at: DateTime<Utc>,
}

/// A scheduled match between two teams
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Match {
    pub id: i64,
    pub server_id: i64,
    pub team1: String,
    pub team2: String,
    pub match_date: DateTime<Utc>,
    /// JSON array of role IDs to mention, when set
    pub role_mentions: Option<String>,
    pub channel_id: String,
    pub message_id: Option<String>,
    pub is_active: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
}

/// Fields needed to create a match row
#[derive(Debug, Clone)]
pub struct NewMatch {
    pub server_id: i64,
    pub team1: String,
    pub team2: String,
    pub match_date: DateTime<Utc>,
    pub channel_id: String,
    pub created_by: String,
    pub role_mentions: Option<Vec<String>>,
}

/// An upcoming match joined with its server name, as the JSON API serves it
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UpcomingMatch {
    pub id: i64,
    pub team1: String,
    pub team2: String,
    pub match_date: DateTime<Utc>,
    pub server: String,
}

/// A recorded command invocation
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommandLog {
    pub id: i64,
    pub server_id: String,
    pub user_id: String,
    pub username: String,
    pub command: String,
    pub channel_id: String,
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Fields needed to record a command invocation
#[derive(Debug, Clone)]
pub struct NewCommandLog {
    pub server_id: String,
    pub user_id: String,
    pub username: String,
    pub command: String,
    pub channel_id: String,
    pub details: Option<String>,
}

/// Command usage count, as the JSON API serves it
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CommandCount {
    pub command: String,
    pub count: i64,
}

/// Log volume for a single day, as the activity chart consumes it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DailyActivity {
    pub date: String,
    pub logs: i64,
}

/// Per-server statistics for the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct ServerStats {
    pub server_name: String,
    pub total_matches: i64,
    pub active_matches: i64,
    pub total_logs: i64,
    pub has_log_channel: bool,
    pub has_activity_channel: bool,
    pub restricted_channels: bool,
}
