//! Web dashboard and JSON statistics API for Warden
//!
//! Serves two surfaces over the shared store: a JSON API under `/api` that
//! summarizes bot usage, and server-rendered HTML pages for browsing servers,
//! matches, and command logs.

pub mod api;
pub mod pages;

use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use warden_common::Result;
use warden_store::Store;

/// Shared state for all web handlers
#[derive(Clone)]
pub struct WebState {
    /// Persistent store shared with the bot
    pub store: Arc<Store>,
    /// When the process started, for the health endpoint
    pub started_at: DateTime<Utc>,
}

impl WebState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
        }
    }
}

/// Create the router with all dashboard pages and API endpoints
pub fn create_router(state: WebState) -> Router {
    Router::new()
        // Dashboard pages
        .route("/", get(pages::index))
        .route("/servers", get(pages::servers))
        .route("/server/:guild_id", get(pages::server_detail))
        .route("/matches", get(pages::matches))
        .route("/logs", get(pages::logs))
        .route("/stats", get(pages::stats))
        // JSON API
        .route("/api/stats", get(api::get_stats))
        .route("/api/activity", get(api::get_activity))
        .route("/api/commands", get(api::get_top_commands))
        .route("/api/matches/upcoming", get(api::get_upcoming_matches))
        .route("/api/server/:guild_id/stats", get(api::get_server_stats))
        .route("/api/health", get(api::health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Bind and serve the dashboard until the process shuts down
pub async fn serve(state: WebState, addr: SocketAddr) -> Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Web dashboard listening on http://{}", addr);
    axum::serve(listener, router)
        .await
        .map_err(warden_common::WardenError::Io)?;

    Ok(())
}
