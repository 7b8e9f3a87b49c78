//! Persistent storage over a SQLite connection pool

use chrono::{DateTime, Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};
use warden_common::Result;

use crate::models::{
    CommandCount, CommandLog, DailyActivity, Match, NewCommandLog, NewMatch, Server, ServerStats,
    UpcomingMatch,
};

/// Database schema version for migrations
const SCHEMA_VERSION: i32 = 1;

/// Storage manager shared by the bot and the web dashboard
#[derive(Debug, Clone)]
pub struct Store {
    /// SQLite connection pool
    pool: SqlitePool,
}

impl Store {
    /// Connect to the database and initialize the schema
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        info!("Connecting to database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect(database_url)
            .await?;

        let store = Self { pool };
        store.initialize_schema().await?;

        info!("Store initialized");
        Ok(store)
    }

    /// Initialize the database schema
    async fn initialize_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let current_version: Option<i32> =
            sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        match current_version {
            Some(version) if version >= SCHEMA_VERSION => {
                debug!("Database schema is up to date (version {})", version);
                return Ok(());
            }
            Some(version) => {
                info!(
                    "Upgrading database schema from version {} to {}",
                    version, SCHEMA_VERSION
                );
            }
            None => {
                info!("Creating initial database schema (version {})", SCHEMA_VERSION);
            }
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS servers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                guild_id TEXT NOT NULL UNIQUE,
                guild_name TEXT NOT NULL,
                log_channel_id TEXT,
                activity_channel_id TEXT,
                allowed_channels TEXT, -- JSON array of channel IDs
                joined_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS matches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                server_id INTEGER NOT NULL,
                team1 TEXT NOT NULL,
                team2 TEXT NOT NULL,
                match_date TEXT NOT NULL,
                role_mentions TEXT, -- JSON array of role IDs
                channel_id TEXT NOT NULL,
                message_id TEXT,
                is_active BOOLEAN NOT NULL DEFAULT 1,
                created_by TEXT NOT NULL,
                created_at TEXT NOT NULL,
                ended_at TEXT,
                FOREIGN KEY (server_id) REFERENCES servers (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        // Reminder rows are schema-only: nothing populates or delivers them.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS match_reminders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER NOT NULL,
                reminder_time TEXT NOT NULL,
                reminder_type TEXT NOT NULL, -- '10min' or '3min'
                sent BOOLEAN NOT NULL DEFAULT 0,
                FOREIGN KEY (match_id) REFERENCES matches (id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS bot_logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                server_id TEXT NOT NULL,
                user_id TEXT NOT NULL,
                username TEXT NOT NULL,
                command TEXT NOT NULL,
                channel_id TEXT NOT NULL,
                details TEXT,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("INSERT INTO schema_version (version, applied_at) VALUES (?, ?)")
            .bind(SCHEMA_VERSION)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // --- servers ---

    /// Insert a server row, or refresh its name if the guild is already known.
    /// Returns the row id.
    pub async fn upsert_server(&self, guild_id: &str, guild_name: &str) -> Result<i64> {
        sqlx::query(
            r#"
            INSERT INTO servers (guild_id, guild_name, joined_at)
            VALUES (?, ?, ?)
            ON CONFLICT (guild_id) DO UPDATE SET guild_name = excluded.guild_name
            "#,
        )
        .bind(guild_id)
        .bind(guild_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        let id: i64 = sqlx::query_scalar("SELECT id FROM servers WHERE guild_id = ?")
            .bind(guild_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    pub async fn get_server(&self, guild_id: &str) -> Result<Option<Server>> {
        let server = sqlx::query_as::<_, Server>("SELECT * FROM servers WHERE guild_id = ?")
            .bind(guild_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(server)
    }

    pub async fn list_servers(&self) -> Result<Vec<Server>> {
        let servers = sqlx::query_as::<_, Server>("SELECT * FROM servers ORDER BY joined_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(servers)
    }

    pub async fn count_servers(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM servers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // --- command logs ---

    /// Record a command invocation
    pub async fn record_command(&self, entry: &NewCommandLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bot_logs (server_id, user_id, username, command, channel_id, details, timestamp)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.server_id)
        .bind(&entry.user_id)
        .bind(&entry.username)
        .bind(&entry.command)
        .bind(&entry.channel_id)
        .bind(&entry.details)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<CommandLog>> {
        let logs = sqlx::query_as::<_, CommandLog>(
            "SELECT * FROM bot_logs ORDER BY timestamp DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// One page of logs, newest first, optionally filtered to a guild
    pub async fn logs_page(
        &self,
        page: u32,
        per_page: u32,
        guild_id: Option<&str>,
    ) -> Result<Vec<CommandLog>> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);

        let logs = match guild_id {
            Some(guild_id) => {
                sqlx::query_as::<_, CommandLog>(
                    "SELECT * FROM bot_logs WHERE server_id = ? ORDER BY timestamp DESC LIMIT ? OFFSET ?",
                )
                .bind(guild_id)
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CommandLog>(
                    "SELECT * FROM bot_logs ORDER BY timestamp DESC LIMIT ? OFFSET ?",
                )
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(logs)
    }

    pub async fn count_logs(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM bot_logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_logs_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM bot_logs WHERE timestamp >= ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Per-day log counts for the last `days` days, newest first. Days with
    /// no activity are reported explicitly with a zero count.
    pub async fn daily_activity(&self, days: u32) -> Result<Vec<DailyActivity>> {
        let days = days.max(1);
        let today = Utc::now().date_naive();
        let cutoff = today - Duration::days(i64::from(days) - 1);

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT date(timestamp) AS day, COUNT(*) AS logs
            FROM bot_logs
            WHERE date(timestamp) >= date(?)
            GROUP BY day
            "#,
        )
        .bind(cutoff.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await?;

        let counts: std::collections::HashMap<String, i64> = rows.into_iter().collect();

        let activity = (0..days)
            .map(|i| {
                let date = (today - Duration::days(i64::from(i)))
                    .format("%Y-%m-%d")
                    .to_string();
                let logs = counts.get(&date).copied().unwrap_or(0);
                DailyActivity { date, logs }
            })
            .collect();

        Ok(activity)
    }

    /// Most-used commands, descending
    pub async fn top_commands(&self, limit: i64) -> Result<Vec<CommandCount>> {
        let counts = sqlx::query_as::<_, CommandCount>(
            r#"
            SELECT command, COUNT(*) AS count
            FROM bot_logs
            GROUP BY command
            ORDER BY count DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    // --- matches ---

    /// Create a match row and return its id
    pub async fn create_match(&self, new_match: &NewMatch) -> Result<i64> {
        let role_mentions = new_match
            .role_mentions
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let result = sqlx::query(
            r#"
            INSERT INTO matches
                (server_id, team1, team2, match_date, role_mentions, channel_id, is_active, created_by, created_at)
            VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?)
            "#,
        )
        .bind(new_match.server_id)
        .bind(&new_match.team1)
        .bind(&new_match.team2)
        .bind(new_match.match_date)
        .bind(role_mentions)
        .bind(&new_match.channel_id)
        .bind(&new_match.created_by)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Active matches for a guild, soonest first
    pub async fn active_matches(&self, guild_id: &str) -> Result<Vec<Match>> {
        let matches = sqlx::query_as::<_, Match>(
            r#"
            SELECT m.* FROM matches m
            JOIN servers s ON s.id = m.server_id
            WHERE s.guild_id = ? AND m.is_active = 1
            ORDER BY m.match_date
            "#,
        )
        .bind(guild_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(matches)
    }

    /// Mark a match as ended. Returns false when the id is unknown or the
    /// match was already ended.
    pub async fn end_match(&self, match_id: i64) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE matches SET is_active = 0, ended_at = ? WHERE id = ? AND is_active = 1",
        )
        .bind(Utc::now())
        .bind(match_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Future active matches across all guilds, soonest first
    pub async fn upcoming_matches(&self, limit: i64) -> Result<Vec<UpcomingMatch>> {
        let matches = sqlx::query_as::<_, UpcomingMatch>(
            r#"
            SELECT m.id, m.team1, m.team2, m.match_date, s.guild_name AS server
            FROM matches m
            JOIN servers s ON s.id = m.server_id
            WHERE m.match_date > ? AND m.is_active = 1
            ORDER BY m.match_date
            LIMIT ?
            "#,
        )
        .bind(Utc::now())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(matches)
    }

    /// One page of matches, newest created first
    pub async fn matches_page(&self, page: u32, per_page: u32) -> Result<Vec<Match>> {
        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);

        let matches = sqlx::query_as::<_, Match>(
            "SELECT * FROM matches ORDER BY created_at DESC LIMIT ? OFFSET ?",
        )
        .bind(i64::from(per_page))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(matches)
    }

    pub async fn count_matches(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM matches")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_active_matches(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE is_active = 1")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    pub async fn count_matches_since(&self, since: DateTime<Utc>) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE created_at >= ?")
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Aggregate statistics for one guild, or None when it is unknown
    pub async fn server_stats(&self, guild_id: &str) -> Result<Option<ServerStats>> {
        let Some(server) = self.get_server(guild_id).await? else {
            return Ok(None);
        };

        let total_matches: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM matches WHERE server_id = ?")
                .bind(server.id)
                .fetch_one(&self.pool)
                .await?;

        let active_matches: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM matches WHERE server_id = ? AND is_active = 1",
        )
        .bind(server.id)
        .fetch_one(&self.pool)
        .await?;

        let total_logs: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bot_logs WHERE server_id = ?")
            .bind(&server.guild_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(Some(ServerStats {
            server_name: server.guild_name,
            total_matches,
            active_matches,
            total_logs,
            has_log_channel: server.log_channel_id.is_some(),
            has_activity_channel: server.activity_channel_id.is_some(),
            restricted_channels: server.allowed_channels.is_some(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory_store() -> Store {
        Store::connect("sqlite::memory:", 1)
            .await
            .expect("in-memory store")
    }

    fn log_entry(guild: &str, command: &str) -> NewCommandLog {
        NewCommandLog {
            server_id: guild.to_string(),
            user_id: "1001".to_string(),
            username: "tester".to_string(),
            command: command.to_string(),
            channel_id: "2001".to_string(),
            details: None,
        }
    }

    #[tokio::test]
    async fn test_schema_init_is_idempotent() {
        let store = memory_store().await;
        store.initialize_schema().await.expect("second init");
        assert_eq!(store.count_servers().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_upsert_server_updates_name_in_place() {
        let store = memory_store().await;

        let id = store.upsert_server("42", "Old Name").await.unwrap();
        let same_id = store.upsert_server("42", "New Name").await.unwrap();

        assert_eq!(id, same_id);
        assert_eq!(store.count_servers().await.unwrap(), 1);

        let server = store.get_server("42").await.unwrap().unwrap();
        assert_eq!(server.guild_name, "New Name");
    }

    #[tokio::test]
    async fn test_command_logging_and_aggregates() {
        let store = memory_store().await;

        store.record_command(&log_entry("42", "ping")).await.unwrap();
        store.record_command(&log_entry("42", "ping")).await.unwrap();
        store.record_command(&log_entry("99", "kick")).await.unwrap();

        assert_eq!(store.count_logs().await.unwrap(), 3);

        let top = store.top_commands(10).await.unwrap();
        assert_eq!(top[0].command, "ping");
        assert_eq!(top[0].count, 2);

        let guild_logs = store.logs_page(1, 50, Some("42")).await.unwrap();
        assert_eq!(guild_logs.len(), 2);

        let activity = store.daily_activity(7).await.unwrap();
        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].logs, 3);
        assert!(activity[1..].iter().all(|day| day.logs == 0));
    }

    #[tokio::test]
    async fn test_match_lifecycle() {
        let store = memory_store().await;
        let server_id = store.upsert_server("42", "Guild").await.unwrap();

        let match_id = store
            .create_match(&NewMatch {
                server_id,
                team1: "Red".to_string(),
                team2: "Blue".to_string(),
                match_date: Utc::now() + Duration::hours(2),
                channel_id: "2001".to_string(),
                created_by: "1001".to_string(),
                role_mentions: None,
            })
            .await
            .unwrap();

        assert_eq!(store.count_active_matches().await.unwrap(), 1);

        let active = store.active_matches("42").await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].team1, "Red");

        let upcoming = store.upcoming_matches(10).await.unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].server, "Guild");

        assert!(store.end_match(match_id).await.unwrap());
        // A second end is a no-op.
        assert!(!store.end_match(match_id).await.unwrap());

        assert_eq!(store.count_active_matches().await.unwrap(), 0);
        let ended = &store.matches_page(1, 20).await.unwrap()[0];
        assert!(!ended.is_active);
        assert!(ended.ended_at.is_some());
    }

    #[tokio::test]
    async fn test_server_stats_for_unknown_guild_is_none() {
        let store = memory_store().await;
        assert!(store.server_stats("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_stats_counts() {
        let store = memory_store().await;
        let server_id = store.upsert_server("42", "Guild").await.unwrap();

        store.record_command(&log_entry("42", "ping")).await.unwrap();
        store
            .create_match(&NewMatch {
                server_id,
                team1: "A".to_string(),
                team2: "B".to_string(),
                match_date: Utc::now(),
                channel_id: "2001".to_string(),
                created_by: "1001".to_string(),
                role_mentions: Some(vec!["3001".to_string()]),
            })
            .await
            .unwrap();

        let stats = store.server_stats("42").await.unwrap().unwrap();
        assert_eq!(stats.server_name, "Guild");
        assert_eq!(stats.total_matches, 1);
        assert_eq!(stats.active_matches, 1);
        assert_eq!(stats.total_logs, 1);
        assert!(!stats.has_log_channel);
    }
}
