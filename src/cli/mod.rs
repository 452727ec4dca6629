//! CLI module for Dandi Keys
//!
//! Provides subcommands:
//! - `serve`: HTTP server (API, playground and protected pages)
//! - `migrate`: apply PostgreSQL migrations
//! - `diagnose`: ping the configured key store and print a report

pub mod diagnose;
pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Dandi Keys - API key dashboard backend
#[derive(Parser)]
#[command(name = "dandi-keys")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Apply pending PostgreSQL migrations
    Migrate,

    /// Check connectivity to the configured key store
    Diagnose,
}

/// Load `.env`, layered configuration and the global subscriber
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["dandi-keys", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from(["dandi-keys", "migrate"]).unwrap();
        assert!(matches!(cli.command, Command::Migrate));

        let cli = Cli::try_parse_from(["dandi-keys", "diagnose"]).unwrap();
        assert!(matches!(cli.command, Command::Diagnose));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["dandi-keys"]).is_err());
        assert!(Cli::try_parse_from(["dandi-keys", "ui"]).is_err());
    }
}
