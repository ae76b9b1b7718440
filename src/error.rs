//! Error types shared by the persistence layer, the record store and the
//! HTTP handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// All failure modes of the record store and its persistence layer.
///
/// Validation and uniqueness errors are detected before any mutation and
/// never touch disk. `CorruptData` and `IoFailure` originate in the
/// persistence layer and propagate unchanged; no error is retried.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("short code already taken: {0}")]
    DuplicateShortCode(String),
    #[error("user with email already exists: {0}")]
    DuplicateEmail(String),
    #[error("no link with short code: {0}")]
    LinkNotFound(String),
    #[error("no user with email: {0}")]
    UserNotFound(String),
    #[error("corrupt data in {file}: {source}")]
    CorruptData {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("io failure on {file}: {source}")]
    IoFailure {
        file: String,
        #[source]
        source: std::io::Error,
    },
}

/// Maps store errors to HTTP responses with a JSON error body.
///
/// - `404 Not Found` for missing links/users
/// - `409 Conflict` for uniqueness violations
/// - `400 Bad Request` for validation failures
/// - `500 Internal Server Error` for persistence failures
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            StoreError::LinkNotFound(_) | StoreError::UserNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::DuplicateShortCode(_) | StoreError::DuplicateEmail(_) => {
                StatusCode::CONFLICT
            }
            StoreError::InvalidUrl(_) | StoreError::MissingField(_) => StatusCode::BAD_REQUEST,
            StoreError::CorruptData { .. } | StoreError::IoFailure { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
