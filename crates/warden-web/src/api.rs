//! JSON API endpoints summarizing bot activity
//!
//! Every handler reads the shared store and maps database failures to plain
//! status codes; response bodies are serde structs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::error;
use warden_store::{CommandCount, DailyActivity, ServerStats, UpcomingMatch};

use crate::WebState;

/// Query parameters for the activity endpoint
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    /// Number of days to cover (default 7)
    pub days: Option<u32>,
}

/// Query parameters for limited list endpoints
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// Maximum number of results (default 10)
    pub limit: Option<i64>,
}

/// Overall counters for the dashboard header
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub servers: i64,
    pub matches: i64,
    pub active_matches: i64,
    pub logs: i64,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: i64,
}

fn internal_error(err: warden_common::WardenError) -> StatusCode {
    error!("API query failed: {}", err);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Get basic statistics
pub async fn get_stats(
    State(state): State<WebState>,
) -> Result<Json<StatsResponse>, StatusCode> {
    let servers = state.store.count_servers().await.map_err(internal_error)?;
    let matches = state.store.count_matches().await.map_err(internal_error)?;
    let active_matches = state
        .store
        .count_active_matches()
        .await
        .map_err(internal_error)?;
    let logs = state.store.count_logs().await.map_err(internal_error)?;

    Ok(Json(StatsResponse {
        servers,
        matches,
        active_matches,
        logs,
    }))
}

/// Get per-day activity data for charts
pub async fn get_activity(
    Query(query): Query<ActivityQuery>,
    State(state): State<WebState>,
) -> Result<Json<Vec<DailyActivity>>, StatusCode> {
    let days = query.days.unwrap_or(7).clamp(1, 90);

    let activity = state
        .store
        .daily_activity(days)
        .await
        .map_err(internal_error)?;

    Ok(Json(activity))
}

/// Get top commands by usage
pub async fn get_top_commands(
    Query(query): Query<LimitQuery>,
    State(state): State<WebState>,
) -> Result<Json<Vec<CommandCount>>, StatusCode> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let commands = state
        .store
        .top_commands(limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(commands))
}

/// Get upcoming matches
pub async fn get_upcoming_matches(
    Query(query): Query<LimitQuery>,
    State(state): State<WebState>,
) -> Result<Json<Vec<UpcomingMatch>>, StatusCode> {
    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    let matches = state
        .store
        .upcoming_matches(limit)
        .await
        .map_err(internal_error)?;

    Ok(Json(matches))
}

/// Get statistics for a specific server
pub async fn get_server_stats(
    Path(guild_id): Path<String>,
    State(state): State<WebState>,
) -> Result<Json<ServerStats>, StatusCode> {
    let stats = state
        .store
        .server_stats(&guild_id)
        .await
        .map_err(internal_error)?;

    match stats {
        Some(stats) => Ok(Json(stats)),
        None => Err(StatusCode::NOT_FOUND),
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<WebState>) -> Json<HealthResponse> {
    let now = Utc::now();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: (now - state.started_at).num_seconds(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use warden_store::{NewCommandLog, NewMatch, Store};

    async fn state_with_store() -> WebState {
        let store = Store::connect("sqlite::memory:", 1).await.unwrap();
        WebState::new(Arc::new(store))
    }

    fn log_entry(command: &str) -> NewCommandLog {
        NewCommandLog {
            server_id: "42".to_string(),
            user_id: "1001".to_string(),
            username: "tester".to_string(),
            command: command.to_string(),
            channel_id: "2001".to_string(),
            details: None,
        }
    }

    #[tokio::test]
    async fn test_stats_on_empty_store() {
        let state = state_with_store().await;

        let Json(stats) = get_stats(State(state)).await.unwrap();
        assert_eq!(stats.servers, 0);
        assert_eq!(stats.matches, 0);
        assert_eq!(stats.active_matches, 0);
        assert_eq!(stats.logs, 0);
    }

    #[tokio::test]
    async fn test_stats_reflect_recorded_usage() {
        let state = state_with_store().await;
        let server_id = state.store.upsert_server("42", "Guild").await.unwrap();
        state.store.record_command(&log_entry("ping")).await.unwrap();
        state
            .store
            .create_match(&NewMatch {
                server_id,
                team1: "A".to_string(),
                team2: "B".to_string(),
                match_date: Utc::now() + chrono::Duration::hours(1),
                channel_id: "2001".to_string(),
                created_by: "1001".to_string(),
                role_mentions: None,
            })
            .await
            .unwrap();

        let Json(stats) = get_stats(State(state.clone())).await.unwrap();
        assert_eq!(stats.servers, 1);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.active_matches, 1);
        assert_eq!(stats.logs, 1);

        let Json(upcoming) =
            get_upcoming_matches(Query(LimitQuery { limit: None }), State(state))
                .await
                .unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].server, "Guild");
    }

    #[tokio::test]
    async fn test_activity_defaults_to_seven_days() {
        let state = state_with_store().await;
        state.store.record_command(&log_entry("ping")).await.unwrap();

        let Json(activity) = get_activity(Query(ActivityQuery { days: None }), State(state))
            .await
            .unwrap();
        assert_eq!(activity.len(), 7);
        assert_eq!(activity[0].logs, 1);
    }

    #[tokio::test]
    async fn test_top_commands_ordering() {
        let state = state_with_store().await;
        for _ in 0..3 {
            state.store.record_command(&log_entry("ping")).await.unwrap();
        }
        state.store.record_command(&log_entry("kick")).await.unwrap();

        let Json(commands) =
            get_top_commands(Query(LimitQuery { limit: Some(5) }), State(state))
                .await
                .unwrap();
        assert_eq!(commands[0].command, "ping");
        assert_eq!(commands[0].count, 3);
        assert_eq!(commands[1].command, "kick");
    }

    #[tokio::test]
    async fn test_unknown_server_stats_is_404() {
        let state = state_with_store().await;

        let result = get_server_stats(Path("missing".to_string()), State(state)).await;
        assert!(matches!(result, Err(StatusCode::NOT_FOUND)));
    }

    #[tokio::test]
    async fn test_health_reports_version() {
        let state = state_with_store().await;

        let Json(health) = health_check(State(state)).await;
        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
        assert!(health.uptime_seconds >= 0);
    }
}
