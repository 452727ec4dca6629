//! PostgreSQL connection pooling

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/dandi".to_string(),
            max_connections: 10,
            connect_timeout_secs: 30,
        }
    }
}

// The URL can carry a password.
impl std::fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .finish()
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// Open a connection pool
///
/// The first connection is established eagerly so a bad URL or unreachable
/// server fails here rather than on the first request.
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(map_sqlx_error)?;

    info!(
        "Connected to PostgreSQL: max_connections={}",
        config.max_connections
    );

    Ok(pool)
}

/// Sort a sqlx failure into the domain error taxonomy
///
/// Messages reported by the database are passed through unchanged, together
/// with the SQLSTATE code when there is one.
pub fn map_sqlx_error(error: sqlx::Error) -> DomainError {
    match &error {
        sqlx::Error::Database(db) => database_error(
            db.message(),
            db.code().as_deref(),
            db.is_unique_violation(),
        ),
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => DomainError::transport(error.to_string()),
        sqlx::Error::Configuration(_) => DomainError::configuration(error.to_string()),
        _ => DomainError::storage(error.to_string()),
    }
}

fn database_error(message: &str, code: Option<&str>, unique_violation: bool) -> DomainError {
    let error = if unique_violation {
        DomainError::conflict(message)
    } else {
        DomainError::storage(message)
    };

    match code {
        Some(code) => error.with_code(code),
        None => error,
    }
}
