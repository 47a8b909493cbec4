use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use crate::{
    hub::HubMetricsSnapshot,
    logger::{self, LogTag},
    webserver::state::AppState,
};

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Hub status response
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub uptime_seconds: i64,
    pub hub: HubMetricsSnapshot,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(hub_status))
}

/// GET /api/health
async fn health_check() -> Json<HealthResponse> {
    logger::debug(LogTag::Webserver, "Health check endpoint called");

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/status
async fn hub_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let hub = state.hub.metrics().snapshot();

    logger::debug(
        LogTag::Webserver,
        &format!(
            "Status snapshot ready (active_clients={}, routed={}, evictions={})",
            hub.active_clients, hub.messages_routed, hub.evictions
        ),
    );

    Json(StatusResponse {
        uptime_seconds: state.uptime_seconds(),
        hub,
    })
}
