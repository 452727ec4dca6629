//! API Key repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{ApiKey, ApiKeyChanges, ApiKeyId, NewApiKey};
use crate::domain::DomainError;

/// Repository trait for API key storage
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// List all API keys, newest-created first
    async fn list(&self) -> Result<Vec<ApiKey>, DomainError>;

    /// Get an API key by its ID
    async fn get(&self, id: &ApiKeyId) -> Result<Option<ApiKey>, DomainError>;

    /// Check whether any key carries exactly this secret
    async fn secret_exists(&self, secret: &str) -> Result<bool, DomainError>;

    /// Persist a new API key, assigning its ID and creation time
    async fn create(&self, new_key: NewApiKey) -> Result<ApiKey, DomainError>;

    /// Write the fields set in `changes`, leaving the rest as stored
    ///
    /// Returns the record as it stands after the write.
    async fn update(&self, id: &ApiKeyId, changes: ApiKeyChanges) -> Result<ApiKey, DomainError>;

    /// Delete an API key, returns true if a record was removed
    async fn delete(&self, id: &ApiKeyId) -> Result<bool, DomainError>;
}
