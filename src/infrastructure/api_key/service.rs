//! API Key service
//!
//! Provides high-level operations for API key management.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::api_key::{
    check_usage_limit, normalize_name, normalize_secret, supplied, ApiKey, ApiKeyChanges,
    ApiKeyId, ApiKeyRepository, ApiKeyValidationError, NewApiKey,
};
use crate::domain::DomainError;

use super::generator::ApiKeyGenerator;

/// API Key service for managing API keys
#[derive(Debug)]
pub struct ApiKeyService<R>
where
    R: ApiKeyRepository,
{
    repository: Arc<R>,
    generator: ApiKeyGenerator,
}

impl<R: ApiKeyRepository> ApiKeyService<R> {
    /// Create a new API key service
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: ApiKeyGenerator::default(),
        }
    }

    /// Create with a custom generator
    pub fn with_generator(mut self, generator: ApiKeyGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// List all API keys, newest first
    pub async fn list(&self) -> Result<Vec<ApiKey>, DomainError> {
        self.repository.list().await
    }

    /// Get an API key by ID
    pub async fn get(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.find(id).await
    }

    /// Create a new API key with a freshly generated secret
    pub async fn create(&self, name: &str, usage_limit: Option<u64>) -> Result<ApiKey, DomainError> {
        let name = normalize_name(name)?;
        let usage_limit = check_usage_limit(usage_limit)?;
        let secret = self.generator.generate()?;

        info!("Creating API key: name={}", name);

        let created = self
            .repository
            .create(NewApiKey {
                name: name.to_string(),
                secret,
                usage_limit,
            })
            .await?;

        info!("API key created: id={}", created.id());
        Ok(created)
    }

    /// Apply name and/or secret changes
    ///
    /// Only non-blank fields count. Fields that already match the stored
    /// record are dropped and only the rest are handed to the store, so a
    /// rename never rewrites the secret. With nothing left to change the
    /// record is returned without a write.
    pub async fn update(&self, id: &ApiKeyId, changes: ApiKeyChanges) -> Result<ApiKey, DomainError> {
        let name = supplied(changes.name.as_deref());
        let secret = supplied(changes.secret.as_deref());

        if name.is_none() && secret.is_none() {
            return Err(ApiKeyValidationError::NoUpdates.into());
        }

        let name = name.map(normalize_name).transpose()?;
        let current = self.find(id).await?;

        let changed = ApiKeyChanges {
            name: name.filter(|n| *n != current.name()).map(str::to_string),
            secret: secret.filter(|s| *s != current.secret()).map(str::to_string),
        };

        if changed.is_empty() {
            debug!("API key unchanged, skipping write: id={}", id);
            return Ok(current);
        }

        info!(
            "Updating API key: id={}, name_changed={}, secret_changed={}",
            id,
            changed.name.is_some(),
            changed.secret.is_some()
        );

        self.repository.update(id, changed).await
    }

    /// Replace the secret with a newly generated one
    pub async fn rotate(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        let secret = self.generator.generate()?;

        info!("Rotating API key: id={}", id);

        self.repository
            .update(id, ApiKeyChanges::new().with_secret(secret))
            .await
    }

    /// Delete an API key, returns whether a record was removed
    pub async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError> {
        info!("Deleting API key: id={}", id);

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            debug!("API key already absent: id={}", id);
        }

        Ok(deleted)
    }

    /// Check whether a secret belongs to any stored key
    pub async fn validate(&self, secret: &str) -> Result<bool, DomainError> {
        let secret = normalize_secret(secret)?;
        let known = self.repository.secret_exists(secret).await?;

        debug!("API key validation completed: valid={}", known);
        Ok(known)
    }

    async fn find(&self, id: &ApiKeyId) -> Result<ApiKey, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("API key '{}' not found", id)))
    }
}
