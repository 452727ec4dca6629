//! Store diagnostics contract

use async_trait::async_trait;

use crate::domain::DomainError;

/// Connectivity probe for the key store
///
/// Implementations must not read the API key table.
#[async_trait]
pub trait StoreProbe: Send + Sync {
    /// Short backend name, e.g. "memory" or "postgres"
    fn backend(&self) -> &'static str;

    /// Round-trip to the store
    async fn ping(&self) -> Result<(), DomainError>;
}
