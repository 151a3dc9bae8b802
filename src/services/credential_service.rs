//! Credential service - API key lifecycle.
//!
//! This service handles:
//! - Issuing keys (generate, hash, store)
//! - Validating presented keys by hash lookup
//! - Revoking keys by `kid`
//! - Listing the non-secret fields of every key
//!
//! Each operation performs at most one store statement. The plaintext key is
//! returned once from [`CredentialService::generate`] and is never persisted or logged.

use std::fmt;
use std::sync::Arc;

use zeroize::Zeroizing;

use crate::{
    error::AppError,
    models::api_key::{ApiKeySummary, KeyOwner, NewApiKey, non_empty},
    services::{
        hasher::KeyHasher,
        key_generator::{self, kid_from_key},
    },
    store::KeyStore,
};

/// A key as handed back to the caller who generated it. The plaintext is wiped on drop.
pub struct IssuedKey {
    pub kid: String,
    pub api_key: Zeroizing<String>,
}

impl fmt::Debug for IssuedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedKey")
            .field("kid", &self.kid)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Issues, validates, revokes, and lists API keys.
pub struct CredentialService {
    store: Arc<dyn KeyStore>,
    hasher: KeyHasher,
}

impl fmt::Debug for CredentialService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialService")
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl CredentialService {
    pub fn new(store: Arc<dyn KeyStore>, hasher: KeyHasher) -> Self {
        Self { store, hasher }
    }

    /// Issue a new key.
    ///
    /// # Process
    ///
    /// 1. Generate `kid` and plaintext key from the OS random source
    /// 2. Hash the plaintext with the server secret
    /// 3. Insert one row with `revoked = false`
    ///
    /// If the insert fails nothing is stored and the plaintext is dropped.
    ///
    /// # Errors
    ///
    /// - `KeyGeneration`: random source unavailable
    /// - `Storage`: insert failed
    pub async fn generate(
        &self,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<IssuedKey, AppError> {
        let generated = key_generator::generate_api_key()?;
        let hash = self.hasher.hash(&generated.key);

        self.store
            .insert(NewApiKey {
                kid: generated.kid.clone(),
                name: non_empty(name),
                email: non_empty(email),
                hash,
            })
            .await?;

        tracing::info!(kid = %generated.kid, "API key issued");

        Ok(IssuedKey {
            kid: generated.kid,
            api_key: generated.key,
        })
    }

    /// Look up the active key matching `api_key`.
    ///
    /// Returns `Ok(None)` for keys that were never issued and for revoked keys alike.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest`: empty key (the store is not consulted)
    /// - `Storage`: lookup failed
    pub async fn validate(&self, api_key: &str) -> Result<Option<KeyOwner>, AppError> {
        if api_key.is_empty() {
            return Err(AppError::InvalidRequest("apiKey required".to_string()));
        }

        tracing::debug!(
            claimed_kid = kid_from_key(api_key).unwrap_or("<malformed>"),
            "validating API key"
        );

        let hash = self.hasher.hash(api_key);
        let owner = self.store.find_active_by_hash(&hash).await?;

        Ok(owner)
    }

    /// Revoke the key identified by `kid`.
    ///
    /// Permissive: unknown and already-revoked kids succeed without distinction.
    pub async fn revoke(&self, kid: &str) -> Result<(), AppError> {
        if kid.is_empty() {
            return Err(AppError::InvalidRequest("kid required".to_string()));
        }

        let affected = self.store.revoke(kid).await?;
        tracing::info!(kid, affected, "API key revoke requested");

        Ok(())
    }

    /// Non-secret fields of every key. Unpaginated.
    pub async fn list(&self) -> Result<Vec<ApiKeySummary>, AppError> {
        Ok(self.store.list().await?)
    }

    /// Verify the store is reachable.
    pub async fn check_store(&self) -> Result<(), AppError> {
        Ok(self.store.ping().await?)
    }
}
