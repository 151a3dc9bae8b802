//! PostgreSQL-backed key store.

use async_trait::async_trait;

use super::{KeyStore, StoreError};
use crate::db::DbPool;
use crate::models::api_key::{ApiKeySummary, KeyOwner, NewApiKey};

/// Key store over a shared sqlx connection pool.
///
/// The pool is passed in by the caller; this type holds no other state.
#[derive(Debug, Clone)]
pub struct PgKeyStore {
    pool: DbPool,
}

impl PgKeyStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KeyStore for PgKeyStore {
    async fn insert(&self, key: NewApiKey) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO api_keys (kid, name, email, hash, revoked)
            VALUES ($1, $2, $3, $4, false)
            "#,
        )
        .bind(&key.kid)
        .bind(&key.name)
        .bind(&key.email)
        .bind(&key.hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_active_by_hash(&self, hash: &str) -> Result<Option<KeyOwner>, StoreError> {
        let owner = sqlx::query_as::<_, KeyOwner>(
            r#"
            SELECT kid, name, email
            FROM api_keys
            WHERE hash = $1 AND revoked = false
            LIMIT 1
            "#,
        )
        .bind(hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(owner)
    }

    async fn revoke(&self, kid: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("UPDATE api_keys SET revoked = true WHERE kid = $1")
            .bind(kid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn list(&self) -> Result<Vec<ApiKeySummary>, StoreError> {
        let keys = sqlx::query_as::<_, ApiKeySummary>(
            r#"
            SELECT kid, name, email, created_at, revoked
            FROM api_keys
            ORDER BY created_at DESC, kid
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
