//! API error type with IntoResponse
//!
//! Every failure leaves as `{"error": "..."}`. Store errors are logged and
//! replaced with a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;

#[derive(Debug)]
pub enum ApiError {
    /// Request could not be read at all (400)
    BadRequest { message: String },

    /// Resource not found (404)
    NotFound { resource: &'static str },

    /// Store failed while doing `action` (500, logged)
    Store { action: &'static str, source: DbError },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    /// For `map_err`: tags a store error with what the handler was doing.
    pub fn store(action: &'static str) -> impl FnOnce(DbError) -> Self {
        move |source| Self::Store { action, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            Self::NotFound { resource } => (StatusCode::NOT_FOUND, format!("{resource} not found")),
            Self::Store { action, source } => {
                tracing::error!(error = %source, "failed to {action}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to {action}"),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
