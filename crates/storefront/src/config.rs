//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KIRANA_STORE_API_URL` - Base URL of the store backend
//!
//! ## Optional
//! - `KIRANA_STORE_API_TOKEN` - Bearer token for the store backend
//! - `KIRANA_HTTP_TIMEOUT_SECS` - HTTP request timeout (default: 30)
//! - `KIRANA_PRODUCTS_TTL_SECS` - Catalog cache TTL (default: 30)
//! - `KIRANA_CART_TTL_SECS` - Cart cache TTL (default: 30)
//! - `KIRANA_STORE_INFO_TTL_SECS` - Store info cache TTL (default: 3600)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the store backend API
    pub store_api_url: Url,
    /// Bearer token for the store backend, if it requires one
    pub store_api_token: Option<SecretString>,
    /// Timeout applied to every store API request
    pub http_timeout: Duration,
    /// Cache TTLs per query kind
    pub cache: CacheConfig,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("store_api_url", &self.store_api_url.as_str())
            .field(
                "store_api_token",
                &self.store_api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("http_timeout", &self.http_timeout)
            .field("cache", &self.cache)
            .finish()
    }
}

/// How long each cached query snapshot stays fresh.
///
/// The cart entry is also invalidated explicitly after every successful
/// mutation; its TTL is only a backstop.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub products_ttl: Duration,
    pub cart_ttl: Duration,
    pub store_info_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            products_ttl: Duration::from_secs(30),
            cart_ttl: Duration::from_secs(30),
            store_info_ttl: Duration::from_secs(3600),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let store_api_url = get_required_env("KIRANA_STORE_API_URL")?
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("KIRANA_STORE_API_URL".to_string(), e.to_string())
            })?;
        let store_api_token = get_optional_env("KIRANA_STORE_API_TOKEN").map(SecretString::from);
        let http_timeout = get_duration_secs("KIRANA_HTTP_TIMEOUT_SECS", 30)?;

        let cache = CacheConfig {
            products_ttl: get_duration_secs("KIRANA_PRODUCTS_TTL_SECS", 30)?,
            cart_ttl: get_duration_secs("KIRANA_CART_TTL_SECS", 30)?,
            store_info_ttl: get_duration_secs("KIRANA_STORE_INFO_TTL_SECS", 3600)?,
        };

        Ok(Self {
            store_api_url,
            store_api_token,
            http_timeout,
            cache,
        })
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get a duration in whole seconds, falling back to a default when unset.
fn get_duration_secs(key: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}
