//! URL validation utilities.
//!
//! One validator is shared by the router and the trim operation so both agree
//! on what counts as a URL: it must parse as an absolute URI with a scheme and a
//! non-empty host.

use url::Url;

use crate::error_handling::OperationError;

/// Parses `candidate` as an absolute URI with scheme and authority.
///
/// Returns `None` for relative references, URIs without a host (`mailto:`,
/// `data:`, `file:///...`). Length is not limited.
pub fn parse_absolute_url(candidate: &str) -> Option<Url> {
    let parsed = Url::parse(candidate).ok()?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Some(parsed),
        _ => None,
    }
}

/// Returns `true` when `candidate` is an absolute URI with scheme and host.
pub fn is_valid_uri(candidate: &str) -> bool {
    parse_absolute_url(candidate).is_some()
}

/// Returns `true` when `candidate` is an absolute http(s) URI with a host.
pub fn is_fetchable_url(candidate: &str) -> bool {
    parse_absolute_url(candidate).is_some_and(|url| is_http_scheme(&url))
}

/// Returns `true` when the URL uses a scheme the HTTP client can fetch.
pub fn is_http_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Parses a URL an operation is about to fetch.
///
/// # Errors
///
/// Returns `OperationError::InvalidInput` without touching the network when the
/// URL does not parse, has no host, or uses a scheme other than http/https.
pub fn require_http_url(candidate: &str) -> Result<Url, OperationError> {
    let url = parse_absolute_url(candidate)
        .ok_or_else(|| OperationError::InvalidInput(format!("Failed to parse URL: {candidate}")))?;
    if !is_http_scheme(&url) {
        return Err(OperationError::InvalidInput(format!(
            "Unsupported URL scheme '{}' (only http:// and https:// allowed): {}",
            url.scheme(),
            candidate
        )));
    }
    Ok(url)
}
