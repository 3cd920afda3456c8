//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from
//! `config/default.toml`, an environment overlay, and `DOCBASE__*`
//! environment variables. Each sub-module represents one section.

pub mod app;
pub mod database;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::store::{StoreBackend, StoreConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides (`DOCBASE__SERVER__PORT`).
const ENV_PREFIX: &str = "DOCBASE";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// PostgreSQL connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Document store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a base file, an environment overlay, and
    /// environment variables.
    ///
    /// `base_path` is given without extension handling constraints; the
    /// `config` crate resolves `config/default` to `config/default.toml`.
    /// The overlay is `config/{env}` next to it. Both files are optional.
    pub fn load(base_path: &str, env: &str) -> Result<Self, AppError> {
        let base = base_path.trim_end_matches(".toml");
        let overlay = match base.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{env}"),
            None => env.to_string(),
        };

        let config = config::Config::builder()
            .add_source(config::File::with_name(base).required(false))
            .add_source(config::File::with_name(&overlay).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make the repository unusable.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.store.collection.trim().is_empty() {
            return Err(AppError::configuration("store.collection must not be empty"));
        }
        if self.store.max_item_count == 0 {
            return Err(AppError::configuration(
                "store.max_item_count must be greater than zero",
            ));
        }
        if self.store.backend == StoreBackend::Postgres && self.database.url.trim().is_empty() {
            return Err(AppError::configuration(
                "database.url is required for the postgres store backend",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_use_memory_backend() {
        let config = AppConfig::default();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.max_item_count, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let mut config = AppConfig::default();
        config.store.max_item_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_requires_url_for_postgres() {
        let mut config = AppConfig::default();
        config.store.backend = StoreBackend::Postgres;
        config.database.url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_files_falls_back_to_defaults() {
        let config = AppConfig::load("does-not-exist/default", "test").expect("load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.collection, "documents");
    }
}
