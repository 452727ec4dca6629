//! Migrate command - applies the key table schema to PostgreSQL

use tracing::info;

use crate::domain::DomainError;
use crate::infrastructure::storage::{
    connect_pool, run_storage_migrations, PostgresConfig, PostgresMigrator,
};

/// Apply pending migrations against the configured database
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let url = config.storage.database_url().ok_or_else(|| {
        DomainError::configuration("storage.database_url or DATABASE_URL is required to migrate")
    })?;

    let pool = connect_pool(
        &PostgresConfig::new(url)
            .with_max_connections(1)
            .with_connect_timeout(config.storage.connect_timeout_secs),
    )
    .await?;

    let applied = run_storage_migrations(&pool).await?;
    let version = PostgresMigrator::new(pool.clone()).current_version().await?;

    info!(
        applied = applied,
        version = ?version,
        "Migrations complete"
    );

    pool.close().await;
    Ok(())
}
