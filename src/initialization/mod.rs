//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - HTTP clients (redirect-following and non-following)
//! - Operation context handed to the router

mod client;
mod logger;

use std::sync::Arc;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::operations::OperationContext;

// Re-export public API
pub use client::{init_client, init_redirect_client};
pub use logger::init_logger_with;

/// Initializes the operation context from a configuration.
///
/// Builds both HTTP clients once; the context is then shared read-only by every
/// invocation.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if either client cannot be built.
pub fn init_context(config: &Config) -> Result<Arc<OperationContext>, InitializationError> {
    let client = init_client(config)?;
    let redirect_client = init_redirect_client(config)?;
    Ok(Arc::new(OperationContext::new(
        client,
        redirect_client,
        config.clone(),
    )))
}
