//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DAIRY_API_BASE_URL` - Backend root, e.g. `https://dairy.example.in/api/`
//!
//! ## Optional
//! - `DAIRY_API_TIMEOUT_SECS` - Per-request timeout (default: 10, range 1-120)
//! - `DAIRY_SESSION_FILE` - Where the session and local state live
//!   (default: `.dairy-session.json`)
//! - `DAIRY_PAGE_SIZE` - Rows per list page (default: 5)
//! - `DAIRY_DEFAULT_RATE` - Price per litre when a row has none (default: 64)

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use dairy_ledger_core::Rate;
use dairy_ledger_core::listing::DEFAULT_PAGE_SIZE;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 120;
const DEFAULT_SESSION_FILE: &str = ".dairy-session.json";
const DEFAULT_RATE: i64 = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Dairy backend client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend root; endpoint scripts are resolved against it
    pub base_url: Url,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// File backing the local key-value store
    pub session_file: PathBuf,
    /// Rows per list page
    pub page_size: NonZeroUsize,
    /// Price per litre used when a delivery row carries no rate
    pub default_rate: Rate,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the backend URL.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("DAIRY_API_BASE_URL", base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            page_size: DEFAULT_PAGE_SIZE,
            default_rate: Rate::from(DEFAULT_RATE),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or any value is
    /// malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let base_url = parse_base_url(
            "DAIRY_API_BASE_URL",
            &get_required_env("DAIRY_API_BASE_URL")?,
        )?;

        let timeout_secs = get_env_or_default("DAIRY_API_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar("DAIRY_API_TIMEOUT_SECS".to_string(), e.to_string()))?;
        if !(1..=MAX_TIMEOUT_SECS).contains(&timeout_secs) {
            return Err(ConfigError::InvalidEnvVar(
                "DAIRY_API_TIMEOUT_SECS".to_string(),
                format!("must be between 1 and {MAX_TIMEOUT_SECS}"),
            ));
        }

        let session_file = get_optional_env("DAIRY_SESSION_FILE")
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let page_size = get_env_or_default("DAIRY_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse::<NonZeroUsize>()
            .map_err(|e| ConfigError::InvalidEnvVar("DAIRY_PAGE_SIZE".to_string(), e.to_string()))?;

        let default_rate = get_env_or_default("DAIRY_DEFAULT_RATE", &DEFAULT_RATE.to_string())
            .parse::<Rate>()
            .map_err(|e| ConfigError::InvalidEnvVar("DAIRY_DEFAULT_RATE".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            session_file,
            page_size,
            default_rate,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the backend root, making sure relative joins stay under it.
fn parse_base_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    // Url::join drops the last segment unless the path ends with '/'
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
