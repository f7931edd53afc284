//! Uniform response envelopes and the single place where failures become HTTP responses.

use crate::utils::error::{ErrorCategory, SchoolError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SuccessBody<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

pub fn success<T: Serialize>(data: T, message: Option<&str>) -> SuccessBody<T> {
    SuccessBody {
        success: true,
        data,
        message: message.map(str::to_string),
    }
}

pub fn failure(message: impl Into<String>, errors: Option<Vec<String>>) -> FailureBody {
    FailureBody {
        success: false,
        message: message.into(),
        errors,
    }
}

impl IntoResponse for SchoolError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match self.category() {
            ErrorCategory::Client | ErrorCategory::Missing => {
                tracing::warn!("Request rejected ({}): {:?}", status, self)
            }
            ErrorCategory::Persistence | ErrorCategory::System => {
                tracing::error!("Request failed ({}): {:?}", status, self)
            }
        }

        let body = match self {
            SchoolError::Validation { errors } => failure("Validation failed", Some(errors)),
            SchoolError::Database { message, .. } => failure("Database error", Some(vec![message])),
            e @ SchoolError::NotFound { .. } => failure(e.to_string(), None),
            SchoolError::Config { .. } | SchoolError::Io(_) | SchoolError::Internal { .. } => {
                failure("Internal server error", None)
            }
        };

        (status, Json(body)).into_response()
    }
}
