//! API key models and request/response types.
//!
//! This module defines:
//! - `ApiKeyRecord`: Database entity for one issued credential
//! - `KeyOwner` / `ApiKeySummary`: Non-secret projections returned to clients
//! - Request and response bodies for the four key endpoints
//!
//! Request bodies are explicit schemas; required fields are `Option` so a
//! missing value becomes a 400 with a precise message instead of a generic
//! deserialization failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Represents an API key record from the database.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `kid`: Public identifier (12 hex characters)
/// - `name`, `email`: Optional caller-supplied metadata
/// - `hash`: HMAC-SHA256 of the plaintext key, hex encoded
/// - `revoked`: One-way flag disabling validation
/// - `created_at`: Assigned by the database on insert
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub kid: String,
    pub name: Option<String>,
    pub email: Option<String>,

    /// The only stored form of the secret. Never serialized.
    pub hash: String,

    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

/// Values written by a single insert. `revoked` and `created_at` come from column defaults.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub kid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub hash: String,
}

/// Identity attached to an active key, returned on successful validation.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct KeyOwner {
    pub kid: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Listing row. Contains no key material.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ApiKeySummary {
    pub kid: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub revoked: bool,
}

impl From<ApiKeyRecord> for ApiKeySummary {
    fn from(record: ApiKeyRecord) -> Self {
        Self {
            kid: record.kid,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
            revoked: record.revoked,
        }
    }
}

impl From<&ApiKeyRecord> for KeyOwner {
    fn from(record: &ApiKeyRecord) -> Self {
        Self {
            kid: record.kid.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// Request body for `POST /generate`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "billing-worker",
///   "email": "ops@example.com"
/// }
/// ```
///
/// Both fields are optional. A `notes` field is tolerated for older clients
/// and discarded.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for `POST /validate`.
#[derive(Deserialize)]
pub struct ValidateRequest {
    #[serde(default, rename = "apiKey")]
    pub api_key: Option<Zeroizing<String>>,
}

/// Request body for `POST /revoke`.
#[derive(Debug, Deserialize)]
pub struct RevokeRequest {
    #[serde(default)]
    pub kid: Option<String>,
}

/// Response for `POST /generate`. The only place the plaintext key ever appears.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,

    #[serde(rename = "apiKey")]
    pub api_key: Zeroizing<String>,

    pub kid: String,
}

/// Response for `POST /validate`.
///
/// Unknown and revoked keys both serialize as `{"success":true,"valid":false}`.
#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub valid: bool,

    #[serde(flatten)]
    pub owner: Option<KeyOwner>,
}

/// Response for `GET /keys`.
#[derive(Debug, Serialize)]
pub struct ListKeysResponse {
    pub success: bool,
    pub keys: Vec<ApiKeySummary>,
}

/// Response for `POST /revoke`.
#[derive(Debug, Serialize)]
pub struct RevokeResponse {
    pub success: bool,
    pub message: String,
    pub kid: String,
}

/// Collapse empty strings to `None`, matching how absent metadata is stored.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn generate_request_ignores_notes() {
        let request: GenerateRequest =
            serde_json::from_value(json!({"name": "ci", "notes": "rotates monthly"})).unwrap();

        assert_eq!(request.name.as_deref(), Some("ci"));
        assert!(request.email.is_none());
    }

    #[test]
    fn validate_request_reads_camel_case_field() {
        let request: ValidateRequest =
            serde_json::from_value(json!({"apiKey": "sk-abc-def"})).unwrap();
        assert_eq!(
            request.api_key.as_deref().map(String::as_str),
            Some("sk-abc-def")
        );

        let empty: ValidateRequest = serde_json::from_value(json!({})).unwrap();
        assert!(empty.api_key.is_none());
    }

    #[test]
    fn invalid_validation_has_no_identity_fields() {
        let body = serde_json::to_value(ValidateResponse {
            success: true,
            valid: false,
            owner: None,
        })
        .unwrap();

        assert_eq!(body, json!({"success": true, "valid": false}));
    }

    #[test]
    fn valid_validation_flattens_owner() {
        let body = serde_json::to_value(ValidateResponse {
            success: true,
            valid: true,
            owner: Some(KeyOwner {
                kid: "0a1b2c3d4e5f".to_string(),
                name: Some("ci".to_string()),
                email: None,
            }),
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "success": true,
                "valid": true,
                "kid": "0a1b2c3d4e5f",
                "name": "ci",
                "email": null
            })
        );
    }

    #[test]
    fn non_empty_drops_blank_metadata() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("a".into())), Some("a".to_string()));
    }
}
