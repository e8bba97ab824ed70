//! URL trim operation.
//!
//! Reduces each URL of a comma-separated list to its root domain or its
//! origin. Items that are not URLs are reported one by one instead of failing
//! the request; only a list with no usable URL at all is rejected.
//!
//! The root-domain reduction is deliberately naive: it keeps the last two
//! labels of the hostname and knows nothing about multi-label public suffixes,
//! so `shop.example.co.uk` becomes `co.uk`.

use serde::Serialize;
use url::{Host, Url};

use crate::config::{TrimMode, MSG_INVALID_URL, MSG_INVALID_URLS};
use crate::models::Response;
use crate::validation::parse_absolute_url;

/// Result for one input item, serialized as `{original, trimmed}` or
/// `{original, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TrimEntry {
    Trimmed { original: String, trimmed: String },
    Failed { original: String, error: String },
}

impl TrimEntry {
    fn is_trimmed(&self) -> bool {
        matches!(self, TrimEntry::Trimmed { .. })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SingleOriginBody {
    trimmed_url: String,
}

/// Runs the trim operation for the router.
///
/// Returns 400 `Invalid URL(s) provided` when no item is a valid URL. In
/// origin mode a single item answers `{trimmedUrl}`; every other case answers
/// the per-item array.
pub fn handle(raw: &str, mode: TrimMode) -> Response {
    let entries = trim_urls(raw, mode);

    if !entries.iter().any(TrimEntry::is_trimmed) {
        return Response::error(400, MSG_INVALID_URLS);
    }

    if mode == TrimMode::Origin && entries.len() == 1 {
        if let Some(TrimEntry::Trimmed { trimmed, .. }) = entries.into_iter().next() {
            return Response::ok(&SingleOriginBody {
                trimmed_url: trimmed,
            });
        }
        // A single entry that is not trimmed was rejected above
        return Response::error(400, MSG_INVALID_URLS);
    }

    Response::ok(&entries)
}

/// Splits `raw` on commas and trims every non-blank item.
///
/// One entry per item, in input order, duplicates kept.
pub fn trim_urls(raw: &str, mode: TrimMode) -> Vec<TrimEntry> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| trim_one(piece, mode))
        .collect()
}

fn trim_one(original: &str, mode: TrimMode) -> TrimEntry {
    let Some(url) = parse_absolute_url(original) else {
        return TrimEntry::Failed {
            original: original.to_string(),
            error: MSG_INVALID_URL.to_string(),
        };
    };

    let trimmed = match mode {
        TrimMode::RootDomain => root_domain_of(&url),
        TrimMode::Origin => origin_of(&url),
    };

    match trimmed {
        Some(trimmed) => TrimEntry::Trimmed {
            original: original.to_string(),
            trimmed,
        },
        None => TrimEntry::Failed {
            original: original.to_string(),
            error: "URL has no host".to_string(),
        },
    }
}

fn root_domain_of(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(domain) => {
            let root = root_domain(domain);
            (!root.is_empty()).then_some(root)
        }
        // IP literals have no domain labels to drop
        Host::Ipv4(_) | Host::Ipv6(_) => url.host_str().map(str::to_string),
    }
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str().filter(|h| !h.is_empty())?;
    // port() is None when the port is the scheme's default
    Some(match url.port() {
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
        None => format!("{}://{}", url.scheme(), host),
    })
}

/// Keeps the last two dot-separated labels of `host`.
///
/// Hostnames with two labels or fewer are returned unchanged. A trailing root
/// dot is dropped first.
///
/// ```
/// use url_toolbox::operations::root_domain;
///
/// assert_eq!(root_domain("a.b.example.com"), "example.com");
/// assert_eq!(root_domain("example.com"), "example.com");
/// assert_eq!(root_domain("shop.example.co.uk"), "co.uk");
/// ```
pub fn root_domain(host: &str) -> String {
    let host = host.strip_suffix('.').unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() > 2 {
        labels[labels.len() - 2..].join(".")
    } else {
        host.to_string()
    }
}
