//! services/client/src/config.rs
//!
//! Defines the client's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL every REST path is appended to, without a trailing slash.
    pub api_url: String,
    /// Token handed out by the static token provider, if any.
    pub access_token: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let api_url = std::env::var("TRACKER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = normalize_api_url(&api_url)
            .map_err(|reason| ConfigError::InvalidValue("TRACKER_API_URL".to_string(), reason))?;

        let access_token = std::env::var("TRACKER_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "WARN".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            api_url,
            access_token,
            log_level,
        })
    }

    /// Replaces the API URL, applying the same checks as `from_env`.
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(api_url)
            .map_err(|reason| ConfigError::InvalidValue("--api-url".to_string(), reason))?;
        Ok(self)
    }
}

/// Trims a trailing slash and requires an http(s) scheme.
pub fn normalize_api_url(raw: &str) -> Result<String, String> {
    let url = raw.trim().trim_end_matches('/').to_string();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("'{}' must start with http:// or https://", raw));
    }
    Ok(url)
}
