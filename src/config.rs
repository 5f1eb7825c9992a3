//! Environment-driven service configuration.
//!
//! | variable                        | default | meaning                          |
//! |---------------------------------|---------|----------------------------------|
//! | `TASKS_DATABASE_URL`            | none    | `PostgreSQL` connection URL      |
//! | `TASKS_DB_POOL_SIZE`            | `10`    | maximum pooled connections       |
//! | `TASKS_DB_CONNECT_TIMEOUT_SECS` | `30`    | pool checkout timeout in seconds |
//! | `TASKS_LOG`                     | `info`  | `tracing` filter directives      |

use std::time::Duration;
use thiserror::Error;

/// Variable holding the database URL.
pub const DATABASE_URL_VAR: &str = "TASKS_DATABASE_URL";
/// Variable holding the connection pool size.
pub const POOL_SIZE_VAR: &str = "TASKS_DB_POOL_SIZE";
/// Variable holding the pool checkout timeout in seconds.
pub const CONNECT_TIMEOUT_VAR: &str = "TASKS_DB_CONNECT_TIMEOUT_SECS";
/// Variable holding the log filter.
pub const LOG_FILTER_VAR: &str = "TASKS_LOG";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors returned while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required configuration variable {0}")]
    Missing(&'static str),

    /// A variable is set to an unusable value.
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Rejected value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Connection settings for the `PostgreSQL` task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    url: String,
    pool_size: u32,
    connect_timeout: Duration,
}

impl DatabaseConfig {
    /// Creates settings for `url` with default pool sizing.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    /// Sets the maximum number of pooled connections.
    #[must_use]
    pub const fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the pool checkout timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Returns the connection URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the maximum number of pooled connections.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Returns the pool checkout timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    database: DatabaseConfig,
    log_filter: String,
}

impl ServiceConfig {
    /// Loads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is missing or a value
    /// cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;

        let pool_size = match lookup(POOL_SIZE_VAR) {
            Some(raw) => parse_positive(POOL_SIZE_VAR, &raw)?,
            None => DEFAULT_POOL_SIZE,
        };
        let timeout_secs = match lookup(CONNECT_TIMEOUT_VAR) {
            Some(raw) => u64::from(parse_positive(CONNECT_TIMEOUT_VAR, &raw)?),
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };
        let log_filter = lookup(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());

        Ok(Self {
            database: DatabaseConfig::new(url)
                .with_pool_size(pool_size)
                .with_connect_timeout(Duration::from_secs(timeout_secs)),
            log_filter,
        })
    }

    /// Returns the database settings.
    #[must_use]
    pub const fn database(&self) -> &DatabaseConfig {
        &self.database
    }

    /// Returns the `tracing` filter directives.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }
}

fn parse_positive(key: &'static str, raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        key,
        value: raw.to_owned(),
        reason,
    };
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|err| invalid(err.to_string()))?;
    if value == 0 {
        return Err(invalid("must be greater than zero".to_owned()));
    }
    Ok(value)
}
