//! API key HTTP handlers.
//!
//! This module implements the credential endpoints:
//! - POST /generate - Issue a new key
//! - POST /validate - Check a presented key
//! - GET /keys - List keys (no secrets)
//! - POST /revoke - Disable a key by `kid`

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    app::AppState,
    error::AppError,
    models::api_key::{
        GenerateRequest, GenerateResponse, ListKeysResponse, RevokeRequest, RevokeResponse,
        ValidateRequest, ValidateResponse,
    },
};

/// Issue a new API key.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "billing-worker",
///   "email": "ops@example.com"
/// }
/// ```
///
/// The body may be omitted or empty, with or without a JSON content type.
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "apiKey": "sk-...", "kid": "..."}`
/// - **Error (500)**: `{"success": false, "message": "Database error"}`
///
/// The plaintext `apiKey` is only ever returned here.
pub async fn generate_key(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, AppError> {
    // An absent or blank body means no metadata.
    let request = if body.trim_ascii().is_empty() {
        GenerateRequest::default()
    } else {
        Json::<GenerateRequest>::from_bytes(&body)?.0
    };

    let issued = state
        .credentials
        .generate(request.name, request.email)
        .await?;

    Ok(Json(GenerateResponse {
        success: true,
        api_key: issued.api_key,
        kid: issued.kid,
    }))
}

/// Validate a presented API key.
///
/// # Request Body
///
/// ```json
/// { "apiKey": "sk-0a1b2c3d4e5f-..." }
/// ```
///
/// # Response
///
/// - **Valid**: `{"success": true, "valid": true, "kid": "...", "name": ..., "email": ...}`
/// - **Unknown or revoked**: `{"success": true, "valid": false}`
/// - **Error (400)**: `apiKey` missing or empty
/// - **Error (500)**: store unreachable
pub async fn validate_key(
    State(state): State<AppState>,
    payload: Result<Json<ValidateRequest>, JsonRejection>,
) -> Result<Json<ValidateResponse>, AppError> {
    let Json(request) = payload?;
    // Presence is checked by the service, which also guards non-HTTP callers.
    let api_key = request.api_key.unwrap_or_default();

    let owner = state.credentials.validate(&api_key).await?;

    Ok(Json(ValidateResponse {
        success: true,
        valid: owner.is_some(),
        owner,
    }))
}

/// List every key's non-secret fields.
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "keys": [
///     {
///       "kid": "0a1b2c3d4e5f",
///       "name": "billing-worker",
///       "email": null,
///       "created_at": "2025-12-20T10:00:00Z",
///       "revoked": false
///     }
///   ]
/// }
/// ```
pub async fn list_keys(State(state): State<AppState>) -> Result<Json<ListKeysResponse>, AppError> {
    let keys = state.credentials.list().await?;

    Ok(Json(ListKeysResponse {
        success: true,
        keys,
    }))
}

/// Revoke a key by `kid`.
///
/// # Request Body
///
/// ```json
/// { "kid": "0a1b2c3d4e5f" }
/// ```
///
/// Succeeds for unknown and already-revoked kids too; the response does not
/// reveal whether the kid existed.
pub async fn revoke_key(
    State(state): State<AppState>,
    payload: Result<Json<RevokeRequest>, JsonRejection>,
) -> Result<Json<RevokeResponse>, AppError> {
    let Json(request) = payload?;
    let kid = request.kid.unwrap_or_default();

    state.credentials.revoke(&kid).await?;

    Ok(Json(RevokeResponse {
        success: true,
        message: "Key revoked".to_string(),
        kid,
    }))
}
