//! Client configuration
//!
//! Settings come from, in order of precedence: command-line flags (see
//! [`crate::cli`]), environment variables, then built-in defaults.

use chrono::Duration;
use std::env;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_SECS;

/// Default backend address for a local development server
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the backend address
pub const BASE_URL_ENV: &str = "SHENGHANG_API_BASE_URL";

/// Environment variable overriding the cache TTL, in seconds
pub const CACHE_TTL_ENV: &str = "SHENGHANG_CACHE_TTL_SECS";

/// Errors for invalid configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Invalid cache TTL '{0}': expected a whole number of seconds")]
    InvalidCacheTtl(String),
}

/// Settings for a [`ShengHangClient`](crate::client::ShengHangClient)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address prefixed to every endpoint path, without a trailing slash
    pub base_url: String,
    /// Lifetime of response cache entries
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cache_ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads overrides from the environment on top of the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV) {
            config = config.with_base_url(&url)?;
        }
        if let Some(ttl) = lookup(CACHE_TTL_ENV) {
            config = config.with_cache_ttl_str(&ttl)?;
        }
        Ok(config)
    }

    /// Sets the base address, dropping any trailing slash
    pub fn with_base_url(mut self, url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        Ok(self)
    }

    /// Sets the cache TTL in seconds
    pub fn with_cache_ttl_secs(mut self, secs: u32) -> Self {
        self.cache_ttl = Duration::seconds(i64::from(secs));
        self
    }

    fn with_cache_ttl_str(self, value: &str) -> Result<Self, ConfigError> {
        let secs = value
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidCacheTtl(value.to_string()))?;
        Ok(self.with_cache_ttl_secs(secs))
    }
}
