use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use ts_rs::TS;

use crate::state::AppState;

#[derive(Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct HealthResponse {
    status: String,
    uptime_secs: u64,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let uptime_secs = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs,
    })
}
