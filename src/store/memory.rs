//! In-memory key store, used as a test double for the database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{KeyStore, StoreError};
use crate::models::api_key::{ApiKeyRecord, ApiKeySummary, KeyOwner, NewApiKey};

/// Key store held in a `HashMap` keyed by `kid`.
///
/// Can be switched into an unavailable mode where every call fails, which
/// stands in for a lost database connection.
#[derive(Debug, Default)]
pub struct InMemoryKeyStore {
    records: RwLock<HashMap<String, ApiKeyRecord>>,
    unavailable: AtomicBool,
}

impl InMemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Full stored row, including the hash.
    pub async fn record(&self, kid: &str) -> Option<ApiKeyRecord> {
        self.records.read().await.get(kid).cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store marked unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn insert(&self, key: NewApiKey) -> Result<(), StoreError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        if records.contains_key(&key.kid) {
            return Err(StoreError::DuplicateKid(key.kid));
        }

        records.insert(
            key.kid.clone(),
            ApiKeyRecord {
                kid: key.kid,
                name: key.name,
                email: key.email,
                hash: key.hash,
                revoked: false,
                created_at: Utc::now(),
            },
        );

        Ok(())
    }

    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<KeyOwner>, StoreError> {
        self.check_available()?;

        let records = self.records.read().await;
        Ok(records
            .values()
            .find(|r| !r.revoked && r.hash == hash)
            .map(KeyOwner::from))
    }

    async fn revoke(&self, kid: &str) -> Result<u64, StoreError> {
        self.check_available()?;

        let mut records = self.records.write().await;
        match records.get_mut(kid) {
            Some(record) => {
                record.revoked = true;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list(&self) -> Result<Vec<ApiKeySummary>, StoreError> {
        self.check_available()?;

        let records = self.records.read().await;
        let mut keys: Vec<ApiKeySummary> = records.values().cloned().map(Into::into).collect();
        keys.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.kid.cmp(&b.kid)));

        Ok(keys)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
