//! Storage factory for runtime key store selection

use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, StoreProbe};
use crate::infrastructure::api_key::{InMemoryApiKeyRepository, PostgresApiKeyRepository};

use super::migrations::run_storage_migrations;
use super::postgres::{connect_pool, PostgresConfig};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage, lost on restart
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InMemory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres {
        config: PostgresConfig,
        /// Apply pending migrations right after connecting
        run_migrations: bool,
    },
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig, run_migrations: bool) -> Self {
        Self::Postgres {
            config,
            run_migrations,
        }
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres { .. } => StorageType::Postgres,
        }
    }
}

/// A connected key store
#[derive(Debug, Clone)]
pub enum KeyStore {
    InMemory(Arc<InMemoryApiKeyRepository>),
    Postgres(Arc<PostgresApiKeyRepository>),
}

impl KeyStore {
    /// Connectivity probe backed by the same store
    pub fn probe(&self) -> Arc<dyn StoreProbe> {
        match self {
            Self::InMemory(repo) => repo.clone(),
            Self::Postgres(repo) => repo.clone(),
        }
    }
}

/// Factory for creating key stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a key store based on the configuration
    pub async fn create(config: &StorageConfig) -> Result<KeyStore, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory key store");
                Ok(KeyStore::InMemory(Arc::new(InMemoryApiKeyRepository::new())))
            }
            StorageConfig::Postgres {
                config,
                run_migrations,
            } => {
                let pool = connect_pool(config).await?;

                if *run_migrations {
                    run_storage_migrations(&pool).await?;
                }

                info!("Using PostgreSQL key store");
                Ok(KeyStore::Postgres(Arc::new(PostgresApiKeyRepository::new(
                    pool,
                ))))
            }
        }
    }
}
