use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub api_key_configured: bool,
    pub active_sessions: usize,
    pub uptime_seconds: i64,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let manager = &state.conversation_manager;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_key_configured: manager.provider_configured(),
            active_sessions: manager.active_sessions(),
            uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
        }),
    )
}

/// Ready only when chat requests can reach the completion provider.
pub async fn readiness_check(State(state): State<AppState>) -> StatusCode {
    if state.conversation_manager.provider_configured() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
