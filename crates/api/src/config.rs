//! Server configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `API_HOST` | `0.0.0.0` |
//! | `API_PORT` | `3000` |
//! | `DATABASE_URL` | required |
//! | `LOG_LEVEL` | `info`; unknown values fall back to it |
//! | `API_CORS_ORIGINS` | unset, comma-separated when given |
//! | `ADMIN_TOKEN` | unset, which closes the opening-hours editor |
//! | `API_REQUEST_TIMEOUT_SECONDS` | `30` |

use std::{env, str::FromStr, time::Duration};

use eyre::{Result, WrapErr, eyre};
use tracing::Level;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for [`crate::start_server`].
///
/// ```no_run
/// use slotbook_api::config::ApiConfig;
///
/// # fn main() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// assert!(!config.database_url.is_empty());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub log_level: Level,
    /// Origins allowed by CORS; no CORS layer when `None`.
    pub cors_origins: Option<Vec<String>>,
    /// Value expected in `x-admin-token`.
    pub admin_token: Option<String>,
    pub request_timeout: Duration,
}

impl ApiConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Fails when `DATABASE_URL` is missing or `API_PORT` is not a port number.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Reads the configuration through `var`, which maps a variable name to
    /// its value.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("API_PORT") {
            Some(raw) => raw
                .parse()
                .wrap_err_with(|| format!("API_PORT is not a port number: {raw}"))?,
            None => 3000,
        };

        let database_url =
            var("DATABASE_URL").ok_or_else(|| eyre!("DATABASE_URL must be set"))?;

        let log_level = var("LOG_LEVEL")
            .and_then(|raw| Level::from_str(raw.trim()).ok())
            .unwrap_or(Level::INFO);

        let cors_origins = var("API_CORS_ORIGINS").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect()
        });

        let request_timeout = var("API_REQUEST_TIMEOUT_SECONDS")
            .and_then(|raw| raw.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            host: var("API_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            database_url,
            log_level,
            cors_origins,
            admin_token: var("ADMIN_TOKEN").filter(|token| !token.is_empty()),
            request_timeout,
        })
    }

    /// `host:port` to bind.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
