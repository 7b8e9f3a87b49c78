//! Server-rendered dashboard pages
//!
//! Plain HTML assembled from small render helpers; all dynamic values pass
//! through [`escape_html`] at this boundary since the i18n and store layers
//! return raw text.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::error;
use warden_store::{CommandLog, Match, Server};

use crate::WebState;

const MATCHES_PER_PAGE: u32 = 20;
const LOGS_PER_PAGE: u32 = 50;

/// Query parameters shared by the paginated pages
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub guild_id: Option<String>,
}

/// Escape text for interpolation into HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Pagination bookkeeping for list pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl Pagination {
    pub fn new(page: Option<u32>, per_page: u32, total: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page,
            total,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let pages = (self.total + i64::from(self.per_page) - 1) / i64::from(self.per_page);
        u32::try_from(pages.max(1)).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Warden</title>
<style>
body {{ font-family: sans-serif; margin: 0; background: #f5f6fa; color: #222; }}
nav {{ background: #2c3e50; padding: 0.75rem 1.5rem; }}
nav a {{ color: #ecf0f1; margin-right: 1.25rem; text-decoration: none; }}
main {{ padding: 1.5rem; max-width: 960px; margin: 0 auto; }}
table {{ border-collapse: collapse; width: 100%; background: #fff; }}
th, td {{ border: 1px solid #ddd; padding: 0.5rem; text-align: left; }}
th {{ background: #34495e; color: #fff; }}
.cards {{ display: flex; gap: 1rem; flex-wrap: wrap; margin-bottom: 1.5rem; }}
.card {{ background: #fff; border: 1px solid #ddd; padding: 1rem 1.5rem; min-width: 8rem; }}
.card strong {{ display: block; font-size: 1.6rem; }}
.pager a {{ margin-right: 1rem; }}
</style>
</head>
<body>
<nav>
<a href="/">Overview</a>
<a href="/servers">Servers</a>
<a href="/matches">Matches</a>
<a href="/logs">Logs</a>
<a href="/stats">Statistics</a>
</nav>
<main>
<h1>{title}</h1>
{body}
</main>
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

fn stat_card(label: &str, value: i64) -> String {
    format!(
        r#"<div class="card"><strong>{value}</strong>{label}</div>"#,
        value = value,
        label = escape_html(label),
    )
}

fn logs_table(logs: &[CommandLog]) -> String {
    if logs.is_empty() {
        return "<p>No logs recorded yet.</p>".to_string();
    }

    let rows: String = logs
        .iter()
        .map(|log| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>/{}</td><td>{}</td><td>{}</td></tr>",
                log.timestamp.format("%Y-%m-%d %H:%M"),
                escape_html(&log.username),
                escape_html(&log.command),
                escape_html(&log.server_id),
                escape_html(log.details.as_deref().unwrap_or("")),
            )
        })
        .collect();

    format!(
        "<table><tr><th>Time (UTC)</th><th>User</th><th>Command</th><th>Server</th><th>Details</th></tr>{rows}</table>"
    )
}

fn matches_table(matches: &[Match]) -> String {
    if matches.is_empty() {
        return "<p>No matches recorded yet.</p>".to_string();
    }

    let rows: String = matches
        .iter()
        .map(|m| {
            format!(
                "<tr><td>{}</td><td>{} vs {}</td><td>{}</td><td>{}</td></tr>",
                m.id,
                escape_html(&m.team1),
                escape_html(&m.team2),
                m.match_date.format("%Y-%m-%d %H:%M"),
                if m.is_active { "active" } else { "ended" },
            )
        })
        .collect();

    format!("<table><tr><th>ID</th><th>Teams</th><th>Date (UTC)</th><th>Status</th></tr>{rows}</table>")
}

fn servers_table(servers: &[Server]) -> String {
    if servers.is_empty() {
        return "<p>The bot has not joined any servers yet.</p>".to_string();
    }

    let rows: String = servers
        .iter()
        .map(|server| {
            format!(
                r#"<tr><td><a href="/server/{}">{}</a></td><td>{}</td><td>{}</td></tr>"#,
                escape_html(&server.guild_id),
                escape_html(&server.guild_name),
                escape_html(&server.guild_id),
                server.joined_at.format("%Y-%m-%d"),
            )
        })
        .collect();

    format!("<table><tr><th>Name</th><th>Guild ID</th><th>Joined</th></tr>{rows}</table>")
}

fn pager(base: &str, pagination: Pagination) -> String {
    let mut links = String::from(r#"<p class="pager">"#);
    if pagination.has_prev() {
        links.push_str(&format!(
            r#"<a href="{base}page={}">&laquo; Previous</a>"#,
            pagination.page - 1
        ));
    }
    links.push_str(&format!(
        "Page {} of {}",
        pagination.page,
        pagination.total_pages()
    ));
    if pagination.has_next() {
        links.push_str(&format!(
            r#" <a href="{base}page={}">Next &raquo;</a>"#,
            pagination.page + 1
        ));
    }
    links.push_str("</p>");
    links
}

fn internal_error(err: warden_common::WardenError) -> StatusCode {
    error!("Dashboard query failed: {}", err);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Main dashboard page
pub async fn index(State(state): State<WebState>) -> Result<Html<String>, StatusCode> {
    let servers = state.store.count_servers().await.map_err(internal_error)?;
    let active = state
        .store
        .count_active_matches()
        .await
        .map_err(internal_error)?;
    let recent = state.store.recent_logs(10).await.map_err(internal_error)?;

    let body = format!(
        r#"<div class="cards">{}{}</div><h2>Recent activity</h2>{}"#,
        stat_card("Servers", servers),
        stat_card("Active matches", active),
        logs_table(&recent),
    );

    Ok(Html(layout("Dashboard", &body)))
}

/// Servers overview page
pub async fn servers(State(state): State<WebState>) -> Result<Html<String>, StatusCode> {
    let servers = state.store.list_servers().await.map_err(internal_error)?;
    Ok(Html(layout("Servers", &servers_table(&servers))))
}

/// Server detail page
pub async fn server_detail(
    Path(guild_id): Path<String>,
    State(state): State<WebState>,
) -> Result<Html<String>, StatusCode> {
    let stats = state
        .store
        .server_stats(&guild_id)
        .await
        .map_err(internal_error)?
        .ok_or(StatusCode::NOT_FOUND)?;

    let recent = state
        .store
        .logs_page(1, 5, Some(&guild_id))
        .await
        .map_err(internal_error)?;

    let body = format!(
        r#"<div class="cards">{}{}{}</div><h2>Recent activity</h2>{}"#,
        stat_card("Total matches", stats.total_matches),
        stat_card("Active matches", stats.active_matches),
        stat_card("Commands logged", stats.total_logs),
        logs_table(&recent),
    );

    Ok(Html(layout(&stats.server_name, &body)))
}

/// Matches overview page
pub async fn matches(
    Query(query): Query<PageQuery>,
    State(state): State<WebState>,
) -> Result<Html<String>, StatusCode> {
    let total = state.store.count_matches().await.map_err(internal_error)?;
    let pagination = Pagination::new(query.page, MATCHES_PER_PAGE, total);

    let matches = state
        .store
        .matches_page(pagination.page, MATCHES_PER_PAGE)
        .await
        .map_err(internal_error)?;

    let body = format!(
        "{}{}",
        matches_table(&matches),
        pager("/matches?", pagination)
    );

    Ok(Html(layout("Matches", &body)))
}

/// Logs viewer page
pub async fn logs(
    Query(query): Query<PageQuery>,
    State(state): State<WebState>,
) -> Result<Html<String>, StatusCode> {
    let guild_filter = query.guild_id.as_deref().filter(|id| !id.is_empty());

    let total = state.store.count_logs().await.map_err(internal_error)?;
    let pagination = Pagination::new(query.page, LOGS_PER_PAGE, total);

    let logs = state
        .store
        .logs_page(pagination.page, LOGS_PER_PAGE, guild_filter)
        .await
        .map_err(internal_error)?;

    let base = match guild_filter {
        Some(guild_id) => format!("/logs?guild_id={}&", escape_html(guild_id)),
        None => "/logs?".to_string(),
    };

    let body = format!("{}{}", logs_table(&logs), pager(&base, pagination));
    Ok(Html(layout("Command Logs", &body)))
}

/// Statistics page
pub async fn stats(State(state): State<WebState>) -> Result<Html<String>, StatusCode> {
    let now = Utc::now();
    let week_ago = now - Duration::days(7);
    let month_ago = now - Duration::days(30);

    let total_servers = state.store.count_servers().await.map_err(internal_error)?;
    let total_matches = state.store.count_matches().await.map_err(internal_error)?;
    let active_matches = state
        .store
        .count_active_matches()
        .await
        .map_err(internal_error)?;
    let matches_this_week = state
        .store
        .count_matches_since(week_ago)
        .await
        .map_err(internal_error)?;
    let matches_this_month = state
        .store
        .count_matches_since(month_ago)
        .await
        .map_err(internal_error)?;
    let total_logs = state.store.count_logs().await.map_err(internal_error)?;
    let logs_this_week = state
        .store
        .count_logs_since(week_ago)
        .await
        .map_err(internal_error)?;

    let top = state.store.top_commands(10).await.map_err(internal_error)?;
    let activity = state.store.daily_activity(7).await.map_err(internal_error)?;

    let top_rows: String = top
        .iter()
        .map(|entry| {
            format!(
                "<tr><td>/{}</td><td>{}</td></tr>",
                escape_html(&entry.command),
                entry.count
            )
        })
        .collect();

    let activity_rows: String = activity
        .iter()
        .map(|day| format!("<tr><td>{}</td><td>{}</td></tr>", day.date, day.logs))
        .collect();

    let body = format!(
        r#"<div class="cards">{}{}{}{}{}{}{}</div>
<h2>Top commands</h2>
<table><tr><th>Command</th><th>Uses</th></tr>{top_rows}</table>
<h2>Activity (last 7 days)</h2>
<table><tr><th>Date</th><th>Commands</th></tr>{activity_rows}</table>"#,
        stat_card("Servers", total_servers),
        stat_card("Matches", total_matches),
        stat_card("Active matches", active_matches),
        stat_card("Matches this week", matches_this_week),
        stat_card("Matches this month", matches_this_month),
        stat_card("Commands logged", total_logs),
        stat_card("Commands this week", logs_this_week),
    );

    Ok(Html(layout("Statistics", &body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use warden_store::{NewCommandLog, Store};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_pagination_bounds() {
        let empty = Pagination::new(None, 20, 0);
        assert_eq!(empty.total_pages(), 1);
        assert!(!empty.has_prev());
        assert!(!empty.has_next());

        let multi = Pagination::new(Some(2), 20, 45);
        assert_eq!(multi.total_pages(), 3);
        assert!(multi.has_prev());
        assert!(multi.has_next());

        let last = Pagination::new(Some(3), 20, 45);
        assert!(!last.has_next());
    }

    #[test]
    fn test_pagination_zero_page_clamped() {
        let pagination = Pagination::new(Some(0), 20, 45);
        assert_eq!(pagination.page, 1);
    }

    #[tokio::test]
    async fn test_index_page_renders_activity() {
        let store = Store::connect("sqlite::memory:", 1).await.unwrap();
        store
            .record_command(&NewCommandLog {
                server_id: "42".to_string(),
                user_id: "1001".to_string(),
                username: "<tester>".to_string(),
                command: "ping".to_string(),
                channel_id: "2001".to_string(),
                details: None,
            })
            .await
            .unwrap();

        let state = WebState::new(Arc::new(store));
        let Html(page) = index(State(state)).await.unwrap();

        assert!(page.contains("/ping"));
        // User-supplied text is escaped at the render boundary.
        assert!(page.contains("&lt;tester&gt;"));
        assert!(!page.contains("<tester>"));
    }

    #[tokio::test]
    async fn test_unknown_server_detail_is_404() {
        let store = Store::connect("sqlite::memory:", 1).await.unwrap();
        let state = WebState::new(Arc::new(store));

        let result = server_detail(Path("missing".to_string()), State(state)).await;
        assert!(matches!(result, Err(StatusCode::NOT_FOUND)));
    }
}
