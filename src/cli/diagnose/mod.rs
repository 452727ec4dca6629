//! Diagnose command - pings the key store and prints a JSON report

use tracing::warn;

use crate::api::health::{run_diagnostics, DiagnosticsReport};
use crate::api::types::ApiError;
use crate::domain::DomainError;
use crate::infrastructure::storage::{StorageConfig, StorageFactory, StorageType};

/// Print a diagnostics report; exits non-zero when the store is unreachable
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let database_url_configured = config.storage.database_url().is_some();

    let store_config = without_migrations(crate::storage_config(&config.storage)?);
    let backend = store_config.storage_type();

    let report = match StorageFactory::create(&store_config).await {
        Ok(store) => run_diagnostics(store.probe().as_ref(), database_url_configured).await,
        Err(e) => {
            warn!(error = %e, "Key store connection failed");
            connection_failure(backend, database_url_configured, e)
        }
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.success {
        anyhow::bail!("key store diagnostics failed");
    }

    Ok(())
}

fn without_migrations(config: StorageConfig) -> StorageConfig {
    match config {
        StorageConfig::Postgres { config, .. } => StorageConfig::postgres(config, false),
        other => other,
    }
}

fn connection_failure(
    backend: StorageType,
    database_url_configured: bool,
    error: DomainError,
) -> DiagnosticsReport {
    let api_error = ApiError::from(error);

    DiagnosticsReport {
        backend: backend.as_str().to_string(),
        database_url_configured,
        success: false,
        error: Some(api_error.response.error.message),
        error_kind: Some(api_error.response.error.error_type.to_string()),
        latency_ms: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::PostgresConfig;

    #[test]
    fn test_without_migrations() {
        let config = StorageConfig::postgres(PostgresConfig::new("postgres://localhost/x"), true);

        match without_migrations(config) {
            StorageConfig::Postgres { run_migrations, .. } => assert!(!run_migrations),
            other => panic!("expected postgres config, got {:?}", other),
        }

        let memory = without_migrations(StorageConfig::in_memory());
        assert_eq!(memory.storage_type(), StorageType::InMemory);
    }

    #[test]
    fn test_connection_failure_report() {
        let report = connection_failure(
            StorageType::Postgres,
            true,
            DomainError::transport("connection refused"),
        );

        assert_eq!(report.backend, "postgres");
        assert!(report.database_url_configured);
        assert!(!report.success);
        assert_eq!(report.error_kind.as_deref(), Some("transport_error"));
        assert!(report.error.is_some());
    }
}
