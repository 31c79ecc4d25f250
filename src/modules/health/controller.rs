use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use rampart_core::ApiResponse;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime: f64,
}

pub async fn get_status() -> Json<ApiResponse<StatusResponse>> {
    Json(ApiResponse::ok(StatusResponse {
        message: format!("{} is running", env!("CARGO_PKG_NAME")),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn get_health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        uptime: state.started_at.elapsed().as_secs_f64(),
    }))
}
