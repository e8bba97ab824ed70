//! Error categorization and rendering.
//!
//! Turns `reqwest` errors into short kind labels for logs and into the message
//! text returned to callers.

use std::error::Error as StdError;

/// Categorizes a `reqwest::Error` into a short label for log lines.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// One of `timeout`, `connect`, `redirect`, `status`, `body`, `decode`,
/// `builder`, `request` or `other`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> &'static str {
    // Timeout first: a connect timeout is both is_connect() and is_timeout()
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_status() {
        "status"
    } else if error.is_body() {
        "body"
    } else if error.is_decode() {
        "decode"
    } else if error.is_builder() {
        "builder"
    } else if error.is_request() {
        "request"
    } else {
        "other"
    }
}

/// Renders a `reqwest::Error` together with its source chain.
///
/// `reqwest` keeps the useful part (DNS failure, refused connection) in the
/// source chain, so the top-level `Display` alone reads as
/// "error sending request for url (...)".
pub fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Formats a status code with its reason phrase when one is known.
pub fn format_status(status: &u16, reason: &Option<String>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => format!("{status} {reason}"),
        _ => status.to_string(),
    }
}
