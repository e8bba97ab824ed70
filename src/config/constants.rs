//! Configuration constants.
//!
//! Defaults for timeouts, limits and route keywords used throughout the crate.

/// Default per-request timeout in seconds (sitemap fetch and each redirect hop)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for outbound requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("url_toolbox/", env!("CARGO_PKG_VERSION"));

// Redirect handling
/// Default number of redirect hops inspected by the redirect check
pub const MAX_REDIRECT_HOPS: usize = 10;
/// Upper bound accepted for a configured hop limit.
/// The redirect loop must always terminate, so the limit can never be unbounded.
pub const MAX_REDIRECT_HOPS_CEILING: usize = 50;
/// Number of redirects the sitemap client follows transparently
pub const SITEMAP_CLIENT_MAX_REDIRECTS: usize = 10;

// Response and body size limits
/// Maximum sitemap body size in bytes (50MiB, the uncompressed limit of the sitemap protocol)
pub const MAX_SITEMAP_BODY_SIZE: usize = 50 * 1024 * 1024;

// Route keywords, matched as substrings of the request path in this order
pub const ROUTE_FETCH_SITEMAP: &str = "fetch-sitemap";
pub const ROUTE_TRIM_URL: &str = "trim-url";
pub const ROUTE_CHECK_REDIRECT: &str = "check-redirect";

/// Name of the query parameter carrying the URL(s)
pub const URL_QUERY_PARAM: &str = "url";

// Server defaults
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

// Error messages returned to callers
pub const MSG_NO_URL: &str = "No URL provided";
pub const MSG_INVALID_URL: &str = "Invalid URL";
pub const MSG_INVALID_URLS: &str = "Invalid URL(s) provided";
pub const MSG_INVALID_ENDPOINT: &str = "Invalid API endpoint";
pub const MSG_INTERNAL_ERROR: &str = "Internal error";
