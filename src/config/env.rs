// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from the process environment

use crate::errors::ConfigError;
use std::env;
use std::time::Duration;

/// Log filter used when neither RUST_LOG nor LOG_LEVEL is set
pub const DEFAULT_LOG_LEVEL: &str = "info,actix_web=info,sqlx=warn";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// PostgreSQL host (DB_HOST)
    pub db_host: String,

    /// PostgreSQL port (DB_PORT)
    pub db_port: u16,

    /// PostgreSQL role (DB_USER)
    pub db_user: String,

    /// PostgreSQL password (DB_PASSWORD)
    pub db_password: String,

    /// Database name (DB_NAME)
    pub db_name: String,

    /// Server bind address (default "0.0.0.0")
    pub server_address: String,

    /// Server listen port (PORT, default 8080)
    pub server_port: u16,

    /// Log filter used when RUST_LOG is not set
    pub log_level: String,

    /// Give up waiting for the database after this long; None waits forever
    pub db_wait_timeout: Option<Duration>,

    /// Run sql/init.sql at startup
    pub db_init_schema: bool,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let db_host = required("DB_HOST")?;
        let db_port = parse_port("DB_PORT", required("DB_PORT")?)?;
        let db_user = required("DB_USER")?;
        let db_password = required("DB_PASSWORD")?;
        let db_name = required("DB_NAME")?;

        let server_port = match get("PORT") {
            Some(port) => parse_port("PORT", port)?,
            None => 8080,
        };

        let db_wait_timeout = match get("DB_WAIT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::Invalid {
                    key: "DB_WAIT_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
                (secs > 0).then(|| Duration::from_secs(secs))
            }
            None => None,
        };

        let db_init_schema = matches!(
            get("DB_INIT_SCHEMA").as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("1" | "true")
        );

        Ok(Config {
            db_host,
            db_port,
            db_user,
            db_password,
            db_name,
            server_address: get("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            db_wait_timeout,
            db_init_schema,
        })
    }

    /// host:port the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_address, self.server_port)
    }
}

fn parse_port(key: &'static str, raw: String) -> Result<u16, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::Invalid { key, value: raw })
}
