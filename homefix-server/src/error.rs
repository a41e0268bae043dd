//! Error-to-response mapping for the HTTP boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use crate::intake::IntakeError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not readable JSON; `status` is 400 unless the body was too large
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: &'static str,
    },

    #[error(transparent)]
    Intake(#[from] IntakeError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        debug!("Rejected request body: {}", rejection.body_text());

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::Rejected {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                message: "Request body too large",
            };
        }

        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => "Expected Content-Type: application/json",
            _ => "Invalid JSON body",
        };
        ApiError::Rejected {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

/// `{ success: false, error }` envelope
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Rejected { status, message } => (status, message.to_string()),
            ApiError::Intake(IntakeError::Validation(e)) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Intake(e @ IntakeError::Unexpected(_)) => {
                error!("Request failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = FailureResponse {
            success: false,
            error: message,
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
