//! The three operations behind the router.
//!
//! - `sitemap`: fetch a sitemap and list its `<loc>` values
//! - `trim`: reduce URLs to their root domain or origin
//! - `redirects`: follow a redirect chain hop by hop
//!
//! None depends on another. Each takes the shared `OperationContext` and the
//! URL parameter, and returns a `Response` or an `OperationError`.

pub mod redirects;
pub mod sitemap;
pub mod trim;

use std::sync::Arc;

use crate::config::Config;

pub use redirects::{resolve_redirect_chain, RedirectReport};
pub use sitemap::{fetch_sitemap, parse_sitemap_locations};
pub use trim::{root_domain, trim_urls, TrimEntry};

/// Shared resources needed by the operations.
///
/// Built once per process and shared read-only between invocations.
#[derive(Clone)]
pub struct OperationContext {
    /// HTTP client for sitemap fetches (redirects followed)
    pub client: Arc<reqwest::Client>,
    /// HTTP client for redirect inspection (redirects disabled)
    pub redirect_client: Arc<reqwest::Client>,
    /// Settings for timeouts, hop limit, trim mode and validation
    pub config: Config,
}

impl OperationContext {
    /// Creates a new `OperationContext` with the given resources.
    pub fn new(
        client: Arc<reqwest::Client>,
        redirect_client: Arc<reqwest::Client>,
        config: Config,
    ) -> Self {
        Self {
            client,
            redirect_client,
            config,
        }
    }
}
