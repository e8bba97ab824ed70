//! HTTP redirect chain resolution.
//!
//! Follows redirects manually, one request per hop, so every intermediate
//! `Location` is observed. The client passed in must have redirects disabled.

use anyhow::Context;
use log::{debug, warn};
use reqwest::Url;
use serde::Serialize;

use crate::error_handling::OperationError;
use crate::models::Response;
use crate::operations::OperationContext;
use crate::validation::require_http_url;

/// Outcome of a redirect check, serialized in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectReport {
    /// URL the check started from, as given
    pub original_url: String,
    /// Number of hops taken
    pub redirect_count: usize,
    /// Every `Location` followed, in order
    pub redirect_chain: Vec<String>,
    /// Last URL reached; the original URL when nothing redirected
    pub final_url: String,
}

/// Runs the redirect check for the router.
pub async fn handle(ctx: &OperationContext, url: &str) -> Result<Response, OperationError> {
    let report =
        resolve_redirect_chain(url, ctx.config.max_redirect_hops, &ctx.redirect_client).await?;
    Ok(Response::ok(&report))
}

/// Resolves the redirect chain for a URL, following at most `max_hops` redirects.
///
/// At each hop a status in `[300, 400)` with a `Location` header is recorded
/// and followed; anything else ends the chain. When the hop limit is reached
/// the last location is reported without being fetched, so the loop always
/// terminates even on a redirect cycle.
///
/// Relative `Location` values are resolved against the URL that returned them.
///
/// # Errors
///
/// - `InvalidInput` if `start_url` is not an absolute http(s) URL
/// - `Network` if any hop's request fails; no partial chain is returned
/// - `InvalidLocation` if a `Location` header is not valid text or cannot be
///   resolved to a URL
pub async fn resolve_redirect_chain(
    start_url: &str,
    max_hops: usize,
    client: &reqwest::Client,
) -> Result<RedirectReport, OperationError> {
    require_http_url(start_url)?;

    let mut chain: Vec<String> = Vec::new();
    let mut current = start_url.to_string();

    while chain.len() < max_hops {
        let resp = client.get(&current).send().await?;

        let status = resp.status();
        if !status.is_redirection() {
            // Not a redirect, we've reached the final URL
            break;
        }

        let Some(location) = resp.headers().get(reqwest::header::LOCATION) else {
            warn!(
                "Redirect status {} for {} but no Location header",
                status.as_u16(),
                current
            );
            break;
        };

        let location = location
            .to_str()
            .map_err(|e| OperationError::InvalidLocation {
                location: String::from_utf8_lossy(location.as_bytes()).into_owned(),
                reason: e.to_string(),
            })?
            .trim()
            .to_string();

        let next = resolve_location(&current, &location).map_err(|e| {
            OperationError::InvalidLocation {
                location: location.clone(),
                reason: format!("{e:#}"),
            }
        })?;

        debug!(
            "Hop {}: {} {} -> {}",
            chain.len() + 1,
            status.as_u16(),
            current,
            next
        );
        chain.push(next.clone());
        current = next;
    }

    Ok(RedirectReport {
        original_url: start_url.to_string(),
        redirect_count: chain.len(),
        redirect_chain: chain,
        final_url: current,
    })
}

/// Returns the URL to follow for `location` received from `current`.
///
/// Absolute locations are kept verbatim; relative ones are joined onto `current`.
fn resolve_location(current: &str, location: &str) -> anyhow::Result<String> {
    if Url::parse(location).is_ok() {
        return Ok(location.to_string());
    }
    let base = Url::parse(current).with_context(|| format!("Failed to parse URL: {current}"))?;
    let joined = base
        .join(location)
        .with_context(|| format!("Failed to resolve against {current}"))?;
    Ok(joined.to_string())
}
