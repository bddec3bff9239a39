//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `STOREFRONT_CATALOG_PATH` - JSON product list (default: built-in bouquets)
//! - `STOREFRONT_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `STOREFRONT_SCROLL_DELAY_MS` - Delay before the checkout form scrolls into view (default: 200)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Optional JSON catalog replacing the built-in products
    pub catalog_path: Option<PathBuf>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Delay before scrolling the checkout form into view
    pub scroll_delay_ms: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced by Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            catalog_path: None,
            static_dir: PathBuf::from("crates/storefront/static"),
            scroll_delay_ms: 200,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
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
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            host: get_parsed_env("STOREFRONT_HOST", defaults.host)?,
            port: get_parsed_env("STOREFRONT_PORT", defaults.port)?,
            base_url: get_optional_env("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url),
            catalog_path: get_optional_env("STOREFRONT_CATALOG_PATH").map(PathBuf::from),
            static_dir: get_optional_env("STOREFRONT_STATIC_DIR")
                .map_or(defaults.static_dir, PathBuf::from),
            scroll_delay_ms: get_parsed_env("STOREFRONT_SCROLL_DELAY_MS", defaults.scroll_delay_ms)?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate_env("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: get_rate_env(
                "SENTRY_TRACES_SAMPLE_RATE",
                defaults.sentry_traces_sample_rate,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional, non-empty environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable parsed as `T`, falling back to `default` when unset.
fn get_parsed_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_value(key, get_optional_env(key).as_deref(), default)
}

/// Get a sample rate, rejecting values outside `0.0..=1.0`.
fn get_rate_env(key: &str, default: f32) -> Result<f32, ConfigError> {
    validate_rate(key, get_parsed_env(key, default)?)
}

fn parse_value<T>(key: &str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

fn validate_rate(key: &str, rate: f32) -> Result<f32, ConfigError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_uses_default_when_unset() {
        let port: u16 = parse_value("STOREFRONT_PORT", None, 3000).unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn test_parse_value_trims_input() {
        let port: u16 = parse_value("STOREFRONT_PORT", Some(" 8080 "), 3000).unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("STOREFRONT_PORT", Some("eighty"), 3000).unwrap_err();
        let ConfigError::InvalidEnvVar(key, _) = err;
        assert_eq!(key, "STOREFRONT_PORT");
    }

    #[test]
    fn test_parse_value_host() {
        let host: IpAddr = parse_value("STOREFRONT_HOST", Some("0.0.0.0"), IpAddr::V4(Ipv4Addr::LOCALHOST)).unwrap();
        assert_eq!(host.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate("SENTRY_SAMPLE_RATE", 0.5).is_ok());
        assert!(validate_rate("SENTRY_SAMPLE_RATE", 1.5).is_err());
        assert!(validate_rate("SENTRY_SAMPLE_RATE", -0.1).is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure_follows_base_url() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());
        config.base_url = "https://eternalroses.ro".to_string();
        assert!(config.is_secure());
    }
}
