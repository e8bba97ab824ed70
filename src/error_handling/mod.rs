//! Error handling.
//!
//! This module provides:
//! - The operation failure taxonomy (`ErrorType`) and `OperationError`
//! - Configuration and initialization error types
//! - Categorization helpers for `reqwest` errors
//!
//! Every failure is terminal for the invocation that hit it; nothing is retried.

mod categorization;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, describe_reqwest_error};
pub use types::{ConfigError, ErrorType, InitializationError, OperationError};
