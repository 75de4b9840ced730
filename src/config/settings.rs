//! Application settings loaded from the environment and an optional
//! `hrtrack.toml` file.
//!
//! Environment variables win over the file; the file wins over built-in
//! defaults. A missing file is fine, a malformed one is a configuration
//! error.

use crate::core::retry::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::io::ErrorKind;
use std::time::Duration;

const CONFIG_FILE: &str = "hrtrack.toml";

/// Retry settings as they appear in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrySettings {
    /// Total attempts per storage call
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff unit in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_base_delay_ms() -> u64 {
    DEFAULT_BASE_DELAY.as_millis() as u64
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl RetrySettings {
    /// Converts the settings into the policy the store facade consumes.
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection URL for the relational store
    pub database_url: String,
    /// Retry policy applied to storage calls
    pub retry: RetrySettings,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    database_url: Option<String>,
    #[serde(default)]
    retry: Option<RetrySettings>,
}

/// Loads configuration: `.env` file (if any), then `hrtrack.toml` (if any),
/// then environment variables, which take precedence.
pub fn load_app_configuration() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let file = match std::fs::read_to_string(CONFIG_FILE) {
        Ok(raw) => toml::from_str::<FileConfig>(&raw).map_err(|e| Error::Config {
            message: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })?,
        Err(err) if err.kind() == ErrorKind::NotFound => FileConfig::default(),
        Err(err) => return Err(err.into()),
    };

    let database_url = std::env::var("DATABASE_URL")
        .ok()
        .or(file.database_url)
        .unwrap_or_else(crate::config::database::get_database_url);

    Ok(AppConfig {
        database_url,
        retry: file.retry.unwrap_or_default(),
    })
}
