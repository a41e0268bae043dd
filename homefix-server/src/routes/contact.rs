//! Contact form endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use homefix_common::ContactMessage;

use super::AppState;
use crate::error::ApiResult;

#[derive(Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: ContactMessage,
}

/// POST /api/contact - record a contact form message
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ContactResponse>> {
    let Json(raw) = body?;
    let message = state.intake.submit_contact_message(&raw).await?;

    Ok(Json(ContactResponse {
        success: true,
        message,
    }))
}
