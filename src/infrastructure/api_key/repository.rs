//! In-memory API key repository implementation

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::api_key::{ApiKey, ApiKeyChanges, ApiKeyId, ApiKeyRepository, NewApiKey};
use crate::domain::{DomainError, StoreProbe};

use super::generator::constant_time_compare;

/// In-memory implementation of ApiKeyRepository
///
/// Records are kept in creation order, so listing walks the vector backwards.
/// Contents are lost when the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApiKeyRepository {
    keys: Arc<RwLock<Vec<ApiKey>>>,
}

impl InMemoryApiKeyRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::default()
    }

    fn secret_taken(keys: &[ApiKey], secret: &str, except: Option<&ApiKeyId>) -> bool {
        keys.iter()
            .filter(|k| Some(k.id()) != except)
            .any(|k| constant_time_compare(k.secret(), secret))
    }
}

#[async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.iter().rev().cloned().collect())
    }

    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError> {
        let keys = self.keys.read().await;
        Ok(keys.iter().find(|k| k.id() == id).cloned())
    }

    async fn secret_exists(&self, secret: &str) -> Result<bool, DomainError> {
        let keys = self.keys.read().await;
        Ok(Self::secret_taken(&keys, secret, None))
    }

    async fn create(&self, new_key: NewApiKey) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;

        if Self::secret_taken(&keys, &new_key.secret, None) {
            return Err(DomainError::conflict("An API key with this secret already exists"));
        }

        let api_key = ApiKey::from_new(ApiKeyId::generate(), new_key, Utc::now());
        keys.push(api_key.clone());

        Ok(api_key)
    }

    async fn update(&self, id: &ApiKeyId, changes: ApiKeyChanges) -> Result<ApiKey, DomainError> {
        let mut keys = self.keys.write().await;

        let index = keys
            .iter()
            .position(|k| k.id() == id)
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))?;

        if let Some(secret) = changes.secret.as_deref() {
            if Self::secret_taken(&keys, secret, Some(id)) {
                return Err(DomainError::conflict("An API key with this secret already exists"));
            }
        }

        let stored = &mut keys[index];
        if let Some(name) = changes.name {
            stored.rename(name);
        }
        if let Some(secret) = changes.secret {
            stored.set_secret(secret);
        }

        Ok(stored.clone())
    }

    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        let mut keys = self.keys.write().await;
        let before = keys.len();

        keys.retain(|k| k.id() != id);

        Ok(keys.len() != before)
    }
}

#[async_trait]
impl StoreProbe for InMemoryApiKeyRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_key(name: &str, secret: &str) -> NewApiKey {
        NewApiKey {
            name: name.to_string(),
            secret: secret.to_string(),
            usage_limit: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryApiKeyRepository::new();

        let created = repo.create(new_key("Test", "dnd-aaaa1111")).await.unwrap();
        assert_eq!(created.usage_count(), 0);

        let retrieved = repo.get(created.id()).await.unwrap();
        assert_eq!(retrieved, Some(created));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let repo = InMemoryApiKeyRepository::new();
        assert!(repo.get(&ApiKeyId::generate()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_duplicate_secret() {
        let repo = InMemoryApiKeyRepository::new();

        repo.create(new_key("One", "dnd-same")).await.unwrap();
        let result = repo.create(new_key("Two", "dnd-same")).await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let repo = InMemoryApiKeyRepository::new();

        repo.create(new_key("First", "dnd-1")).await.unwrap();
        repo.create(new_key("Second", "dnd-2")).await.unwrap();
        repo.create(new_key("Third", "dnd-3")).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|k| k.name().to_string())
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = InMemoryApiKeyRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_secret_exists() {
        let repo = InMemoryApiKeyRepository::new();
        repo.create(new_key("Test", "dnd-known")).await.unwrap();

        assert!(repo.secret_exists("dnd-known").await.unwrap());
        assert!(!repo.secret_exists("dnd-knownx").await.unwrap());
        assert!(!repo.secret_exists("dnd-know").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_name_only() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.create(new_key("Before", "dnd-1")).await.unwrap();

        let updated = repo
            .update(key.id(), ApiKeyChanges::new().with_name("After"))
            .await
            .unwrap();

        assert_eq!(updated.name(), "After");
        assert_eq!(updated.secret(), "dnd-1");
        assert_eq!(repo.get(key.id()).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_name_leaves_newer_secret() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.create(new_key("Before", "dnd-old")).await.unwrap();

        repo.update(key.id(), ApiKeyChanges::new().with_secret("dnd-new"))
            .await
            .unwrap();
        let renamed = repo
            .update(key.id(), ApiKeyChanges::new().with_name("After"))
            .await
            .unwrap();

        assert_eq!(renamed.secret(), "dnd-new");
        assert!(!repo.secret_exists("dnd-old").await.unwrap());
    }

    #[tokio::test]
    async fn test_update_secret_only() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.create(new_key("Name", "dnd-1")).await.unwrap();

        let updated = repo
            .update(key.id(), ApiKeyChanges::new().with_secret("dnd-2"))
            .await
            .unwrap();

        assert_eq!(updated.name(), "Name");
        assert_eq!(updated.secret(), "dnd-2");
    }

    #[tokio::test]
    async fn test_update_keeps_own_secret() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.create(new_key("Before", "dnd-1")).await.unwrap();

        let result = repo
            .update(key.id(), ApiKeyChanges::new().with_secret("dnd-1"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_secret_collision() {
        let repo = InMemoryApiKeyRepository::new();
        repo.create(new_key("One", "dnd-1")).await.unwrap();
        let two = repo.create(new_key("Two", "dnd-2")).await.unwrap();

        let result = repo
            .update(two.id(), ApiKeyChanges::new().with_secret("dnd-1"))
            .await;

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(repo.get(two.id()).await.unwrap().unwrap().secret(), "dnd-2");
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryApiKeyRepository::new();

        let result = repo
            .update(&ApiKeyId::generate(), ApiKeyChanges::new().with_name("Ghost"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryApiKeyRepository::new();
        let key = repo.create(new_key("Test", "dnd-1")).await.unwrap();

        assert!(repo.delete(key.id()).await.unwrap());
        assert!(repo.get(key.id()).await.unwrap().is_none());
        assert!(!repo.secret_exists("dnd-1").await.unwrap());

        assert!(!repo.delete(key.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_probe() {
        let repo = InMemoryApiKeyRepository::new();

        assert_eq!(repo.backend(), "memory");
        assert!(repo.ping().await.is_ok());
    }
}
