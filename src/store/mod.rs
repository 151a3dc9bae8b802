//! Key store abstraction.
//!
//! The credential service talks to persistence only through [`KeyStore`].
//! Every method maps to exactly one statement against the backing store, so
//! correctness relies on per-statement atomicity and no in-process locking.

use async_trait::async_trait;

use crate::models::api_key::{ApiKeySummary, KeyOwner, NewApiKey};

mod memory;
mod postgres;

pub use memory::InMemoryKeyStore;
pub use postgres::PgKeyStore;

/// Failure talking to the key store.
///
/// Details are for server-side logs only; clients see a generic message.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate kid: {0}")]
    DuplicateKid(String),
}

/// Persistence for hashed API keys.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Insert a new, unrevoked key. All-or-nothing.
    async fn insert(&self, key: NewApiKey) -> Result<(), StoreError>;

    /// Find the unrevoked key whose hash matches exactly.
    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<KeyOwner>, StoreError>;

    /// Mark the key revoked. Returns the number of rows touched, which may be zero.
    async fn revoke(&self, kid: &str) -> Result<u64, StoreError>;

    /// Non-secret columns of every key, newest first.
    async fn list(&self) -> Result<Vec<ApiKeySummary>, StoreError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}
