//! Catalog configuration.
//!
//! The API key is always supplied from outside the binary. Nothing here is
//! ever logged with the key in clear text.

use std::fmt;
use std::time::Duration;

use crate::client::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const API_KEY_VAR: &str = "SPOONACULAR_API_KEY";
pub const BASE_URL_VAR: &str = "SPOONACULAR_BASE_URL";
pub const TIMEOUT_VAR: &str = "SPOONACULAR_TIMEOUT_SECS";

#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL without a trailing slash
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl CatalogConfig {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, ConfigError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        let parsed = reqwest::Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Loads configuration from `SPOONACULAR_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let base_url = lookup(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let config = Self::new(&base_url, api_key)?;

        match lookup(TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
