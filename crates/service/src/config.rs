//! Database connection configuration.
//!
//! The console is invoked as `mkt <dbname> <port> <user>`; those three values
//! come from the command line. The rest comes from the environment.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `MARKETPLACE_DB_HOST` - Database host (default: localhost)
//! - `MARKETPLACE_DB_PASSWORD` - Database password (default: empty)

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_HOST: &str = "localhost";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Connection settings for the marketplace database.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Database host name or address
    pub host: String,
    /// Database port
    pub port: u16,
    /// Database name
    pub database: String,
    /// Login role
    pub username: String,
    /// Login password (empty unless configured)
    pub password: SecretString,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl DatabaseConfig {
    /// Build configuration from the positional arguments plus environment.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value is empty.
    pub fn from_args(database: &str, port: u16, username: &str) -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(database, port, username, |key| std::env::var(key).ok())
    }

    /// Build configuration using `lookup` in place of the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value is empty.
    pub fn from_lookup<F>(
        database: &str,
        port: u16,
        username: &str,
        lookup: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = require_non_empty("dbname", database)?;
        let username = require_non_empty("user", username)?;
        let host = lookup("MARKETPLACE_DB_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let password = SecretString::from(lookup("MARKETPLACE_DB_PASSWORD").unwrap_or_default());

        Ok(Self {
            host,
            port,
            database,
            username,
            password,
        })
    }

    /// Connection URL with the password omitted, for display.
    #[must_use]
    pub fn display_url(&self) -> String {
        format!(
            "postgresql://{}@{}:{}/{}",
            self.username, self.host, self.port, self.database
        )
    }

    /// Whether a non-empty password is configured.
    #[must_use]
    pub fn has_password(&self) -> bool {
        !self.password.expose_secret().is_empty()
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue(
            name.to_owned(),
            "must not be empty".to_owned(),
        ));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = DatabaseConfig::from_lookup("market", 5432, "alice", no_env).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert!(!config.has_password());
        assert_eq!(config.display_url(), "postgresql://alice@localhost:5432/market");
    }

    #[test]
    fn test_environment_overrides() {
        let config = DatabaseConfig::from_lookup("market", 6543, "alice", |key| match key {
            "MARKETPLACE_DB_HOST" => Some("db.internal".to_owned()),
            "MARKETPLACE_DB_PASSWORD" => Some("s3cr3t".to_owned()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.host, "db.internal");
        assert!(config.has_password());
    }

    #[test]
    fn test_empty_database_rejected() {
        let err = DatabaseConfig::from_lookup("  ", 5432, "alice", no_env).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "dbname"));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = DatabaseConfig::from_lookup("market", 5432, "alice", |key| {
            (key == "MARKETPLACE_DB_PASSWORD").then(|| "s3cr3t".to_owned())
        })
        .unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("s3cr3t"));
    }
}
