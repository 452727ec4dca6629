//! API Key infrastructure implementations
//!
//! This module provides key generation, the key service and the
//! in-memory and PostgreSQL store adapters.

mod generator;
mod postgres_repository;
mod repository;
mod service;

pub use generator::{ApiKeyGenerator, DEFAULT_KEY_PREFIX};
pub use postgres_repository::PostgresApiKeyRepository;
pub use repository::InMemoryApiKeyRepository;
pub use service::ApiKeyService;
