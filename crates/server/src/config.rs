//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ERP_HOST` - Bind address (default: 127.0.0.1)
//! - `ERP_PORT` - Listen port (default: 3000)
//! - `ERP_ADDRESS_DATASET` - Path to an address dataset file (default: bundled dataset)
//! - `ERP_CURRENCY` - Currency used for order totals (default: CNY)
//! - `ERP_CORS_ORIGINS` - Comma-separated origins allowed to call the API
//! - `ERP_RATE_LIMIT_PER_SECOND` - Seconds to replenish one request token (default: 1)
//! - `ERP_RATE_LIMIT_BURST` - Requests allowed in a burst per client IP (default: 50)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate, 0.0-1.0 (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate, 0.0-1.0 (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use erp_dashboard_core::CurrencyCode;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Address dataset file; `None` uses the bundled dataset
    pub address_dataset: Option<PathBuf>,
    /// Currency applied to order totals when a request does not name one
    pub currency: CurrencyCode,
    /// Origins allowed by CORS (empty disables cross-origin access)
    pub cors_origins: Vec<String>,
    /// Per-client rate limiting
    pub rate_limit: RateLimitConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Rate limiter settings, per client IP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Seconds between token replenishments
    pub per_second: u64,
    /// Maximum burst size
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 50,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            address_dataset: None,
            currency: CurrencyCode::default(),
            cors_origins: Vec::new(),
            rate_limit: RateLimitConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ServerConfig {
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
            host: parse_env_or("ERP_HOST", defaults.host)?,
            port: parse_env_or("ERP_PORT", defaults.port)?,
            address_dataset: get_optional_env("ERP_ADDRESS_DATASET").map(PathBuf::from),
            currency: parse_env_or("ERP_CURRENCY", defaults.currency)?,
            cors_origins: get_optional_env("ERP_CORS_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or_default(),
            rate_limit: RateLimitConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_rate("SENTRY_SAMPLE_RATE", defaults.sentry_sample_rate)?,
            sentry_traces_sample_rate: parse_rate(
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
}

impl RateLimitConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            per_second: parse_env_or("ERP_RATE_LIMIT_PER_SECOND", defaults.per_second)?,
            burst_size: parse_env_or("ERP_RATE_LIMIT_BURST", defaults.burst_size)?,
        };

        if config.per_second == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ERP_RATE_LIMIT_PER_SECOND".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        if config.burst_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "ERP_RATE_LIMIT_BURST".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Parse a sample rate and check that it lies in `0.0..=1.0`.
fn parse_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let rate = parse_env_or(key, default)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
