use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::ValidationError;
use core_types::error::VALIDATION_MESSAGE;
use database::DbError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A write referenced a camper or activity that does not exist.
    #[error("Integrity violation: {0}")]
    Integrity(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DbError> for AppError {
    fn from(error: DbError) -> Self {
        match error {
            DbError::IntegrityViolation(message) => AppError::Integrity(message),
            other => AppError::Database(other),
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
///
/// Validation and integrity failures share the `{"errors": [...]}` body and a
/// 400 status; a missing record gets `{"error": "..."}` and a 404.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => {
                tracing::debug!(reasons = ?err.reasons(), "Rejected invalid payload.");
                let body = Json(json!({ "errors": err.messages() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::Integrity(message) => {
                tracing::debug!(%message, "Rejected write with dangling reference.");
                let body = Json(json!({ "errors": [VALIDATION_MESSAGE] }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            AppError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                let body = Json(json!({ "error": "An internal database error occurred" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
