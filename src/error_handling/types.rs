//! Error type definitions.
//!
//! This module defines the failure taxonomy shared by the operations, plus the
//! error enums for configuration and process initialization.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use super::categorization::{describe_reqwest_error, format_status};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error returned by `Config::validate`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A field holds a value the crate cannot work with.
    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },
}

/// Failure categories.
///
/// Every failure an operation can produce belongs to exactly one category. None
/// of them is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Missing or malformed URL or route
    InputValidation,
    /// DNS, connection or timeout failure while fetching
    Network,
    /// The fetched resource answered with a status we cannot use
    UpstreamStatus,
    /// Malformed XML, URL or header value
    Parse,
    /// A panic caught at the router
    Internal,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InputValidation => "input validation error",
            ErrorType::Network => "network error",
            ErrorType::UpstreamStatus => "upstream status error",
            ErrorType::Parse => "parse error",
            ErrorType::Internal => "internal error",
        }
    }
}

/// Failure of a single operation.
///
/// Operations return these as values; the router turns any of them into a 500
/// response carrying the `Display` text.
#[derive(Error, Debug)]
pub enum OperationError {
    /// The operation received input it cannot act on.
    #[error("{0}")]
    InvalidInput(String),

    /// The HTTP request itself failed (DNS, connect, timeout, body read).
    #[error("{}", describe_reqwest_error(.0))]
    Network(#[from] ReqwestError),

    /// The sitemap server answered with a non-2xx status.
    #[error("Failed to fetch sitemap: {}", format_status(.status, .reason))]
    UpstreamStatus { status: u16, reason: Option<String> },

    /// The sitemap body exceeds the size limit.
    #[error("Sitemap body of {size} bytes exceeds the {limit} byte limit")]
    BodyTooLarge { size: u64, limit: usize },

    /// The sitemap body is not well-formed XML.
    #[error("Failed to parse sitemap XML: {0}")]
    Xml(String),

    /// The sitemap parsed but holds no location tags.
    #[error("Sitemap contains no <loc> entries")]
    EmptySitemap,

    /// A redirect response carried a `Location` we cannot follow.
    #[error("Invalid redirect location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

impl OperationError {
    /// Returns the failure category of this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            OperationError::InvalidInput(_) => ErrorType::InputValidation,
            OperationError::Network(_) => ErrorType::Network,
            OperationError::UpstreamStatus { .. } => ErrorType::UpstreamStatus,
            OperationError::BodyTooLarge { .. }
            | OperationError::Xml(_)
            | OperationError::EmptySitemap
            | OperationError::InvalidLocation { .. } => ErrorType::Parse,
        }
    }
}
