//! API error types with IntoResponse
//!
//! Validation failures answer `{"error": ...}`; not-found and store
//! failures answer `{"message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// No matching row (404)
    NotFound { message: &'static str },

    /// Store failure (500, cause logged, never returned)
    Store {
        message: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                json!({ "error": e.to_string() })
            }
            Self::NotFound { message } => json!({ "message": message }),
            Self::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                json!({ "message": message })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}
