use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::validation::FieldErrors;

/// The three error kinds of the voting core, plus the auth and storage
/// failures of the surrounding transport layer. Field errors carry the
/// full per-field report; everything else is a single message.
#[derive(Debug)]
pub enum AppError {
    /// Input-shape failures, one message per offending field.
    Validation(FieldErrors),
    /// Domain-state failures: poll not open, poll already has votes.
    Business(String),
    /// Resource absent or not owned by the caller. No field detail, so
    /// unauthorized callers learn nothing about what exists.
    NotFound(String),
    Authentication(String),
    Forbidden,
    Conflict(String),
    Database(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {:?}", errors),
            AppError::Business(msg) => write!(f, "Business rule violated: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Authentication(msg) => write!(f, "Authentication error: {}", msg),
            AppError::Forbidden => write!(f, "Forbidden"),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "status": "fail", "data": errors }),
            ),
            AppError::Business(msg) => (
                StatusCode::FORBIDDEN,
                json!({ "status": "fail", "message": msg }),
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "status": "fail", "message": msg }),
            ),
            AppError::Authentication(_) => (
                StatusCode::UNAUTHORIZED,
                json!({ "status": "fail", "data": null }),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({ "status": "fail", "data": null }),
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                json!({ "status": "fail", "message": msg }),
            ),
            AppError::Database(msg) => {
                tracing::error!("database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": "error", "message": "Database operation failed" }),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "status": "error", "message": "An internal error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for AppError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for AppError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(err.to_string())
    }
}
