//! Dandi Keys
//!
//! Backend for an API key dashboard:
//! - Create, list, update, rotate and delete API keys
//! - Validate a candidate key by value
//! - In-memory or PostgreSQL key stores behind one service

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::{ApiKeyServiceTrait, AppState};
use config::StorageSettings;
use domain::DomainError;
use infrastructure::api_key::{ApiKeyGenerator, ApiKeyService};
use infrastructure::storage::{KeyStore, PostgresConfig, StorageConfig, StorageFactory, StorageType};
use tracing::info;

/// Translate configured storage settings into a store configuration
///
/// A postgres backend without a database URL is a configuration error.
pub fn storage_config(settings: &StorageSettings) -> Result<StorageConfig, DomainError> {
    match settings.backend.parse::<StorageType>()? {
        StorageType::InMemory => Ok(StorageConfig::in_memory()),
        StorageType::Postgres => {
            let url = settings.database_url().ok_or_else(|| {
                DomainError::configuration(
                    "storage.database_url or DATABASE_URL is required for the postgres backend",
                )
            })?;

            Ok(StorageConfig::postgres(
                PostgresConfig::new(url)
                    .with_max_connections(settings.max_connections)
                    .with_connect_timeout(settings.connect_timeout_secs),
                settings.run_migrations,
            ))
        }
    }
}

/// Create the application state from configuration
pub async fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let store = StorageFactory::create(&storage_config(&config.storage)?).await?;
    let generator = ApiKeyGenerator::new(config.keys.prefix.clone());

    info!("Key store ready: backend={}", store.probe().backend());

    let api_key_service: Arc<dyn ApiKeyServiceTrait> = match &store {
        KeyStore::InMemory(repo) => {
            Arc::new(ApiKeyService::new(repo.clone()).with_generator(generator))
        }
        KeyStore::Postgres(repo) => {
            Arc::new(ApiKeyService::new(repo.clone()).with_generator(generator))
        }
    };

    Ok(AppState::new(api_key_service, store.probe())
        .with_database_url_configured(config.storage.database_url().is_some())
        .with_pending_ttl_secs(config.gate.pending_ttl_secs))
}
