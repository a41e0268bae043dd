//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tracing::warn;

use super::AppState;

const SERVICE_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Serialize)]
pub struct HealthResponse {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    fn with_status(status: &'static str) -> Self {
        Self {
            service: SERVICE_NAME,
            status,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// GET /health - process is up
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::with_status("ok"))
}

/// GET /ready - store answers reads
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match state.intake.waitlist_count().await {
        Ok(_) => (StatusCode::OK, Json(HealthResponse::with_status("ready"))),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::with_status("unavailable")),
            )
        }
    }
}
