//! Run configuration loading and representation.
//!
//! The configuration file is a JSON object with PascalCase keys:
//!
//! ```json
//! {
//!   "Connection": "sqlite:/var/lib/shop",
//!   "DbPath": "shop.db",
//!   "RequestURL": "https://shop.example/import",
//!   "Login": "operator",
//!   "Password": "secret"
//! }
//! ```
//!
//! `Query`, `FailOnHttpError`, `RequestTimeoutSecs` and `StoreTimeoutSecs`
//! are optional. Unknown keys are ignored.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// File name looked up next to the executable when no path is given.
pub const CONFIG_FILE_NAME: &str = "config.json";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Immutable snapshot of operational parameters for one run.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunConfiguration {
    /// Store connection prefix; joined with `db_path` as `{connection}/{db_path}`.
    pub connection: String,
    pub db_path: String,
    #[serde(rename = "RequestURL")]
    pub request_url: String,
    pub login: String,
    pub password: String,

    /// Replaces the default inventory query. Must yield the same five columns.
    #[serde(default)]
    pub query: Option<String>,

    /// Treat a non-2xx response from the remote endpoint as a failed run.
    #[serde(default)]
    pub fail_on_http_error: bool,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub store_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RunConfiguration {
    /// Load and validate the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::invalid("RequestTimeoutSecs must be greater than zero"));
        }
        if self.store_timeout_secs == 0 {
            return Err(ConfigError::invalid("StoreTimeoutSecs must be greater than zero"));
        }
        if matches!(&self.query, Some(q) if q.trim().is_empty()) {
            return Err(ConfigError::invalid("Query cannot be empty"));
        }
        Ok(())
    }

    /// Store URL handed to the database driver.
    pub fn store_url(&self) -> String {
        format!("{}/{}", self.connection, self.db_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(self.store_timeout_secs)
    }
}

impl fmt::Debug for RunConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfiguration")
            .field("connection", &self.connection)
            .field("db_path", &self.db_path)
            .field("request_url", &self.request_url)
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("query", &self.query)
            .field("fail_on_http_error", &self.fail_on_http_error)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("store_timeout_secs", &self.store_timeout_secs)
            .finish()
    }
}

/// Configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}
