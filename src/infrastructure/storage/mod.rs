//! Storage infrastructure - key store selection, pooling and migrations

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{KeyStore, StorageConfig, StorageFactory, StorageType};
pub use migrations::{run_storage_migrations, Migration, PostgresMigrator};
pub use postgres::{connect_pool, map_sqlx_error, PostgresConfig};
