//! Application state for shared services

use std::sync::Arc;

use crate::domain::api_key::{ApiKeyChanges, ApiKeyId, ApiKeyRepository};
use crate::domain::{ApiKey, DomainError, StoreProbe};
use crate::infrastructure::api_key::ApiKeyService;

/// Default lifetime of the pending-key cookie
pub const DEFAULT_PENDING_TTL_SECS: u64 = 60;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub api_key_service: Arc<dyn ApiKeyServiceTrait>,
    pub store_probe: Arc<dyn StoreProbe>,
    /// Whether a database URL was supplied, reported by diagnostics
    pub database_url_configured: bool,
    pub pending_ttl_secs: u64,
}

impl AppState {
    pub fn new(
        api_key_service: Arc<dyn ApiKeyServiceTrait>,
        store_probe: Arc<dyn StoreProbe>,
    ) -> Self {
        Self {
            api_key_service,
            store_probe,
            database_url_configured: false,
            pending_ttl_secs: DEFAULT_PENDING_TTL_SECS,
        }
    }

    pub fn with_database_url_configured(mut self, configured: bool) -> Self {
        self.database_url_configured = configured;
        self
    }

    pub fn with_pending_ttl_secs(mut self, secs: u64) -> Self {
        self.pending_ttl_secs = secs;
        self
    }
}

/// Trait for API key service operations, addressed by string ids
#[async_trait::async_trait]
pub trait ApiKeyServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError>;
    async fn get(&self, id: &str) -> Result<ApiKey, DomainError>;
    async fn create(&self, name: &str, usage_limit: Option<u64>) -> Result<ApiKey, DomainError>;
    async fn update(&self, id: &str, changes: ApiKeyChanges) -> Result<ApiKey, DomainError>;
    async fn rotate(&self, id: &str) -> Result<ApiKey, DomainError>;
    /// Returns whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool, DomainError>;
    async fn validate(&self, secret: &str) -> Result<bool, DomainError>;
}

// Ids that cannot name a record resolve to "not found" rather than bad input.
fn parse_id(id: &str) -> Result<ApiKeyId, DomainError> {
    id.parse::<ApiKeyId>()
        .map_err(|_| DomainError::not_found(format!("API key '{}' not found", id)))
}

#[async_trait::async_trait]
impl<R: ApiKeyRepository + 'static> ApiKeyServiceTrait for ApiKeyService<R> {
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        ApiKeyService::list(self).await
    }

    async fn get(&self, id: &str) -> Result<ApiKey, DomainError> {
        let key_id = parse_id(id)?;
        ApiKeyService::get(self, &key_id).await
    }

    async fn create(&self, name: &str, usage_limit: Option<u64>) -> Result<ApiKey, DomainError> {
        ApiKeyService::create(self, name, usage_limit).await
    }

    async fn update(&self, id: &str, changes: ApiKeyChanges) -> Result<ApiKey, DomainError> {
        let key_id = parse_id(id)?;
        ApiKeyService::update(self, &key_id, changes).await
    }

    async fn rotate(&self, id: &str) -> Result<ApiKey, DomainError> {
        let key_id = parse_id(id)?;
        ApiKeyService::rotate(self, &key_id).await
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        match id.parse::<ApiKeyId>() {
            Ok(key_id) => ApiKeyService::delete(self, &key_id).await,
            Err(_) => Ok(false),
        }
    }

    async fn validate(&self, secret: &str) -> Result<bool, DomainError> {
        ApiKeyService::validate(self, secret).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::api_key::InMemoryApiKeyRepository;

    fn service() -> Arc<dyn ApiKeyServiceTrait> {
        Arc::new(ApiKeyService::new(Arc::new(InMemoryApiKeyRepository::new())))
    }

    #[tokio::test]
    async fn test_malformed_id_is_not_found() {
        let service = service();

        assert!(matches!(
            service.get("not-a-uuid").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service
                .update("not-a-uuid", ApiKeyChanges::new().with_name("X"))
                .await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.rotate("not-a-uuid").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_malformed_id_succeeds() {
        assert!(!service().delete("not-a-uuid").await.unwrap());
    }

    #[tokio::test]
    async fn test_string_id_round_trip() {
        let service = service();
        let created = service.create("Prod", Some(500)).await.unwrap();

        let fetched = service.get(&created.id().to_string()).await.unwrap();
        assert_eq!(fetched, created);

        assert!(service.delete(&created.id().to_string()).await.unwrap());
    }

    #[test]
    fn test_state_builders() {
        let repo = Arc::new(InMemoryApiKeyRepository::new());
        let state = AppState::new(Arc::new(ApiKeyService::new(repo.clone())), repo)
            .with_database_url_configured(true)
            .with_pending_ttl_secs(30);

        assert!(state.database_url_configured);
        assert_eq!(state.pending_ttl_secs, 30);
        assert_eq!(state.store_probe.backend(), "memory");
    }
}
