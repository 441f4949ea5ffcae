//! Client configuration (environment first, CLI flags override).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("STOREFRONT_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("API URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing slash.
    pub api_url: String,
    pub timeout: Duration,
    /// Where the session slots are persisted.
    pub session_file: PathBuf,
}

impl ClientConfig {
    pub fn new(
        api_url: impl Into<String>,
        session_file: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url.into())?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            session_file: session_file.into(),
        })
    }

    /// Read `STOREFRONT_API_URL`, `STOREFRONT_TIMEOUT_SECS` and
    /// `STOREFRONT_SESSION_FILE`, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let api_url =
            std::env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let timeout = match std::env::var("STOREFRONT_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let session_file = match std::env::var("STOREFRONT_SESSION_FILE") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_session_path()?,
        };

        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            timeout,
            session_file,
        })
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(api_url.into())?;
        Ok(self)
    }

    pub fn with_session_file(mut self, session_file: impl Into<PathBuf>) -> Self {
        self.session_file = session_file.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

fn normalize_api_url(raw: String) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(raw));
    }
    Ok(trimmed.to_string())
}

/// `{app_data_dir}/storefront/session.json`.
pub fn default_session_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve the app data directory (data_dir or ~/.local/share)")?;

    let mut path = base;
    path.push("storefront");
    path.push("session.json");
    Ok(path)
}
