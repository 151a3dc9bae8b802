//! Error types and HTTP error response handling.
//!
//! This module defines all request-time errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{services::key_generator::RandomSourceError, store::StoreError};

/// Application-wide error type.
///
/// # Error Categories
///
/// - **Client input**: missing or malformed request fields (400)
/// - **Storage**: key store unreachable or statement failed (500)
/// - **Key generation**: OS random source failed (500)
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// The String is returned to the caller verbatim.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Key store operation failed.
    ///
    /// Details are logged, never returned.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The secure random source failed while generating a key.
    #[error("Key generation error: {0}")]
    KeyGeneration(#[from] RandomSourceError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// ```json
/// {
///   "success": false,
///   "message": "Human-readable error message"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `Storage` → 500 Internal Server Error ("Database error")
/// - `KeyGeneration` → 500 Internal Server Error ("Key generation failed")
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "key store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::KeyGeneration(err) => {
                tracing::error!(error = %err, "key generation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Key generation failed".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "message": message
        }));

        (status, body).into_response()
    }
}
