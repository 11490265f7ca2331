//! Database settings
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults
//! 2. an optional `insurance-db.toml` (or the file passed explicitly)
//! 3. `DATABASE_URL`, when `INSURANCE_DB_URL` is not set
//! 4. `INSURANCE_DB_*` environment variables
//!
//! # Environment Variables
//!
//! * `INSURANCE_DB_URL` - PostgreSQL connection string
//! * `INSURANCE_DB_MAX_CONNECTIONS` / `INSURANCE_DB_MIN_CONNECTIONS` - pool limits
//! * `INSURANCE_DB_CONNECT_TIMEOUT_SECS` - acquire timeout
//! * `INSURANCE_DB_LOG_LEVEL` - trace, debug, info, warn, error (default: info)
//! * `INSURANCE_DB_LOG_JSON` - emit JSON log lines (default: false)

use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::DatabaseError;
use crate::pool::{DatabaseConfig, DEFAULT_DATABASE_URL};

/// Prefix of the environment variables read by [`DatabaseSettings::load`]
pub const ENV_PREFIX: &str = "INSURANCE_DB";

/// Settings file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "insurance-db";

/// Database and logging settings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub idle_timeout_secs: u64,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            max_lifetime_secs: 30 * 60,
            idle_timeout_secs: 10 * 60,
            log_level: "info".to_string(),
            log_json: false,
        }
    }
}

impl DatabaseSettings {
    /// Loads settings from the default file (if present) and the process
    /// environment
    pub fn load() -> Result<Self, DatabaseError> {
        Self::load_from(None)
    }

    /// Loads settings from an explicit file and the process environment
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Configuration` if an explicit file is missing
    /// or any value fails to parse
    pub fn load_from(file: Option<&Path>) -> Result<Self, DatabaseError> {
        Self::build(file, None)
    }

    /// Builds settings from a file and a fixed set of environment variables
    ///
    /// With `env` set to `None` the process environment is used.
    pub fn build(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, DatabaseError> {
        let defaults = Self::default();

        let mut builder = Config::builder()
            .set_default("url", defaults.url)?
            .set_default("max_connections", defaults.max_connections)?
            .set_default("min_connections", defaults.min_connections)?
            .set_default("connect_timeout_secs", defaults.connect_timeout_secs)?
            .set_default("max_lifetime_secs", defaults.max_lifetime_secs)?
            .set_default("idle_timeout_secs", defaults.idle_timeout_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_json", defaults.log_json)?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let lookup = |key: &str| match &env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };
        if lookup(&format!("{}_URL", ENV_PREFIX)).is_none() {
            if let Some(url) = lookup("DATABASE_URL") {
                builder = builder.set_override("url", url)?;
            }
        }

        let environment = Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .source(env);

        let settings: Self = builder.add_source(environment).build()?.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    fn check(&self) -> Result<(), DatabaseError> {
        if self.url.trim().is_empty() {
            return Err(DatabaseError::Configuration("url must not be empty".to_string()));
        }
        if self.max_connections == 0 {
            return Err(DatabaseError::Configuration(
                "max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Converts the settings into pool options
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_lifetime: Duration::from_secs(self.max_lifetime_secs),
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = DatabaseSettings::build(None, env(&[])).unwrap();
        assert_eq!(settings, DatabaseSettings::default());
    }

    #[test]
    fn test_prefixed_environment_overrides_defaults() {
        let settings = DatabaseSettings::build(
            None,
            env(&[
                ("INSURANCE_DB_URL", "postgres://db.internal/insurance"),
                ("INSURANCE_DB_MAX_CONNECTIONS", "25"),
                ("INSURANCE_DB_LOG_JSON", "true"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.url, "postgres://db.internal/insurance");
        assert_eq!(settings.max_connections, 25);
        assert!(settings.log_json);
    }

    #[test]
    fn test_database_url_fallback() {
        let settings =
            DatabaseSettings::build(None, env(&[("DATABASE_URL", "postgres://fallback/db")]))
                .unwrap();
        assert_eq!(settings.url, "postgres://fallback/db");
    }

    #[test]
    fn test_prefixed_url_beats_database_url() {
        let settings = DatabaseSettings::build(
            None,
            env(&[
                ("DATABASE_URL", "postgres://fallback/db"),
                ("INSURANCE_DB_URL", "postgres://primary/db"),
            ]),
        )
        .unwrap();
        assert_eq!(settings.url, "postgres://primary/db");
    }

    #[test]
    fn test_zero_max_connections_is_rejected() {
        let err = DatabaseSettings::build(None, env(&[("INSURANCE_DB_MAX_CONNECTIONS", "0")]))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Configuration(_)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = DatabaseSettings::build(Some(Path::new("/nonexistent/insurance-db.toml")), env(&[]))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Configuration(_)));
    }

    #[test]
    fn test_settings_file_is_read() {
        let path = std::env::temp_dir().join(format!("insurance-db-{}.toml", std::process::id()));
        std::fs::write(&path, "url = \"postgres://from-file/db\"\nmin_connections = 3\n").unwrap();

        let settings = DatabaseSettings::build(Some(&path), env(&[])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.url, "postgres://from-file/db");
        assert_eq!(settings.min_connections, 3);
    }

    #[test]
    fn test_pool_config_conversion() {
        let settings = DatabaseSettings {
            connect_timeout_secs: 5,
            ..DatabaseSettings::default()
        };
        let pool = settings.pool_config();

        assert_eq!(pool.connect_timeout, Duration::from_secs(5));
        assert_eq!(pool.max_connections, settings.max_connections);
    }
}
