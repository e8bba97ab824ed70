//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, limits, route keywords, messages)
//! - The library `Config` and its enums
//! - CLI option types and parsing

mod cli;
mod constants;
mod types;

// Re-export all constants
pub use cli::{Cli, Command, InvokeArgs, ServeArgs};
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, TrimMode, UrlValidation};
