//! Configuration types.
//!
//! This module defines the enums and the `Config` struct shared by the library,
//! the CLI and the host adapters.

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS, MAX_REDIRECT_HOPS_CEILING,
    MAX_SITEMAP_BODY_SIZE,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for log shippers
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the trim operation shortens a URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrimMode {
    /// Last two dot-separated labels of the hostname (`a.b.example.com` -> `example.com`).
    ///
    /// Multi-label public suffixes are not special-cased, so `shop.example.co.uk`
    /// becomes `co.uk`.
    RootDomain,
    /// Scheme, host and non-default port (`https://a.example.com:8443`).
    Origin,
}

/// How strictly the router checks the `url` parameter before dispatching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum UrlValidation {
    /// The parameter only has to be present
    Presence,
    /// Single-URL routes also require an absolute URI with scheme and host
    Strict,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```
/// use url_toolbox::{Config, TrimMode};
///
/// let config = Config {
///     trim_mode: TrimMode::Origin,
///     timeout_seconds: 5,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Maximum redirect hops inspected by the redirect check
    pub max_redirect_hops: usize,

    /// Maximum sitemap body size in bytes
    pub max_sitemap_body_size: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Reduction applied by the trim operation
    pub trim_mode: TrimMode,

    /// URL parameter validation applied by the router
    pub url_validation: UrlValidation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_redirect_hops: MAX_REDIRECT_HOPS,
            max_sitemap_body_size: MAX_SITEMAP_BODY_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            trim_mode: TrimMode::RootDomain,
            url_validation: UrlValidation::Strict,
        }
    }
}

impl Config {
    /// Checks that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.max_redirect_hops == 0 || self.max_redirect_hops > MAX_REDIRECT_HOPS_CEILING {
            return Err(ConfigError::InvalidValue {
                field: "max_redirect_hops",
                reason: format!("must be between 1 and {MAX_REDIRECT_HOPS_CEILING}"),
            });
        }
        if self.max_sitemap_body_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_sitemap_body_size",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user_agent",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
