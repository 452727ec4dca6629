//! Layered application configuration

mod app_config;

pub use app_config::{
    AppConfig, GateConfig, KeysConfig, LogFormat, LoggingConfig, ServerConfig, StorageSettings,
    DATABASE_URL_ENV,
};
