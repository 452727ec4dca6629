//! PostgreSQL API key repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::api_key::{ApiKey, ApiKeyChanges, ApiKeyId, ApiKeyRepository, NewApiKey};
use crate::domain::{DomainError, StoreProbe};
use crate::infrastructure::storage::map_sqlx_error;

const SELECT_COLUMNS: &str = "id, name, api_key, usage, usage_limit, created_at";

/// PostgreSQL implementation of ApiKeyRepository
///
/// Works against the `api_keys` table; the secret lives in the `api_key`
/// column and the usage counter in `usage`.
#[derive(Debug, Clone)]
pub struct PostgresApiKeyRepository {
    pool: PgPool,
}

impl PostgresApiKeyRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApiKeyRepository for PostgresApiKeyRepository {
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM api_keys ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_api_key).collect()
    }

    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM api_keys WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_api_key).transpose()
    }

    async fn secret_exists(&self, secret: &str) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM api_keys WHERE api_key = $1)")
            .bind(secret)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn create(&self, new_key: NewApiKey) -> Result<ApiKey, DomainError> {
        let usage_limit = usage_limit_to_db(new_key.usage_limit)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO api_keys (name, api_key, usage, usage_limit)
            VALUES ($1, $2, 0, $3)
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(&new_key.name)
        .bind(&new_key.secret)
        .bind(usage_limit)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row_to_api_key(&row)
    }

    async fn update(&self, id: &ApiKeyId, changes: ApiKeyChanges) -> Result<ApiKey, DomainError> {
        // Unset fields bind as NULL and keep the stored column.
        let row = sqlx::query(&format!(
            r#"
            UPDATE api_keys
            SET name = COALESCE($2, name), api_key = COALESCE($3, api_key)
            WHERE id = $1
            RETURNING {}
            "#,
            SELECT_COLUMNS
        ))
        .bind(*id.as_uuid())
        .bind(changes.name.as_deref())
        .bind(changes.secret.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(row) => row_to_api_key(&row),
            None => Err(DomainError::not_found(format!("API key '{}' not found", id))),
        }
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StoreProbe for PostgresApiKeyRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }
}

// Limits are range-checked by the service before they reach a store.
fn usage_limit_to_db(limit: Option<u64>) -> Result<Option<i64>, DomainError> {
    limit
        .map(i64::try_from)
        .transpose()
        .map_err(|_| DomainError::internal("usage limit does not fit the usage_limit column"))
}

fn counter_from_db(column: &str, value: i64) -> Result<u64, DomainError> {
    u64::try_from(value)
        .map_err(|_| DomainError::storage(format!("Negative {} in database: {}", column, value)))
}

fn row_to_api_key(row: &sqlx::postgres::PgRow) -> Result<ApiKey, DomainError> {
    let id: Uuid = row.try_get("id").map_err(map_sqlx_error)?;
    let name: String = row.try_get("name").map_err(map_sqlx_error)?;
    let secret: String = row.try_get("api_key").map_err(map_sqlx_error)?;
    let usage: i64 = row.try_get("usage").map_err(map_sqlx_error)?;
    let usage_limit: Option<i64> = row.try_get("usage_limit").map_err(map_sqlx_error)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(map_sqlx_error)?;

    Ok(ApiKey::from_parts(
        ApiKeyId::from_uuid(id),
        name,
        secret,
        counter_from_db("usage", usage)?,
        usage_limit
            .map(|limit| counter_from_db("usage_limit", limit))
            .transpose()?,
        created_at,
    ))
}
