//! Runtime settings read from environment variables.
//!
//! `.env` is loaded by `main` before these are read, so every value can come
//! from either source. Unset variables fall back to development defaults.

use crate::{
    config::{catalog::DEFAULT_CATALOG_PATH, database::DEFAULT_DATABASE_URL},
    errors::{Error, Result},
};
use tracing::debug;

const DEFAULT_ENVIRONMENT: &str = "development";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Process-level settings of the API server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Free-form name reported by `/health`, e.g. `development` or `production`
    pub environment: String,
    pub database_url: String,
    pub api_host: String,
    pub api_port: u16,
    /// Origins allowed by CORS
    pub cors_origins: Vec<String>,
    /// Fallback tracing filter when `RUST_LOG` is unset
    pub log_level: String,
    pub catalog_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            api_host: DEFAULT_HOST.to_string(),
            api_port: DEFAULT_PORT,
            cors_origins: parse_origins(DEFAULT_CORS_ORIGINS),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            catalog_path: DEFAULT_CATALOG_PATH.to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    /// Returns `Error::Config` if `API_PORT` is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_port = match get("API_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| Error::Config {
                message: format!("Invalid API_PORT '{raw}': {e}"),
            })?,
            None => defaults.api_port,
        };

        let settings = Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            api_host: get("API_HOST").unwrap_or(defaults.api_host),
            api_port,
            cors_origins: get("CORS_ORIGINS").map_or(defaults.cors_origins, |raw| parse_origins(&raw)),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            catalog_path: get("CATALOG_PATH").unwrap_or(defaults.catalog_path),
        };
        debug!("Resolved settings: {:?}", settings);
        Ok(settings)
    }

    /// `host:port` for the TCP listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(ToString::to_string)
        .collect()
}
