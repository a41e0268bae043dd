//! Waitlist signup and counter endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::error;

use homefix_common::WaitlistEntry;

use super::AppState;
use crate::error::ApiResult;

#[derive(Serialize)]
pub struct JoinResponse {
    pub success: bool,
    pub entry: WaitlistEntry,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /api/waitlist - record a signup
pub async fn join_waitlist(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<JoinResponse>> {
    let Json(raw) = body?;
    let entry = state.intake.submit_waitlist_entry(&raw).await?;

    Ok(Json(JoinResponse {
        success: true,
        entry,
    }))
}

/// GET /api/waitlist/count - number of signups so far
pub async fn waitlist_count(State(state): State<AppState>) -> impl IntoResponse {
    match state.intake.waitlist_count().await {
        Ok(count) => (StatusCode::OK, Json(CountResponse { count })).into_response(),
        Err(e) => {
            error!("Failed to get waitlist count: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to get waitlist count".to_string(),
                }),
            )
                .into_response()
        }
    }
}
