//! Sitemap fetch operation.
//!
//! Downloads a sitemap with a single GET and lists the text of every `<loc>`
//! element, at any depth, in document order. A sitemap index is treated like
//! any other sitemap: its `<loc>` values are returned, never fetched.

use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use crate::error_handling::OperationError;
use crate::models::Response;
use crate::operations::OperationContext;
use crate::validation::require_http_url;

/// Qualified name of a location tag. Prefixed names such as `image:loc` belong
/// to sitemap extensions and are not location tags.
const LOC_TAG: &[u8] = b"loc";

#[derive(Debug, Serialize)]
struct SitemapBody {
    urls: Vec<String>,
}

/// Runs the sitemap operation for the router.
pub async fn handle(ctx: &OperationContext, url: &str) -> Result<Response, OperationError> {
    let urls = fetch_sitemap(&ctx.client, url, ctx.config.max_sitemap_body_size).await?;
    Ok(Response::ok(&SitemapBody { urls }))
}

/// Fetches the sitemap at `url` and returns its location values.
///
/// `max_body_size` caps the body in bytes; the router passes the configured
/// limit, which defaults to `MAX_SITEMAP_BODY_SIZE`.
///
/// # Errors
///
/// - `InvalidInput` if `url` is not an absolute http(s) URL (no request is made)
/// - `Network` on DNS, connection, timeout or body read failures
/// - `UpstreamStatus` if the final response is not 2xx
/// - `BodyTooLarge` if the body exceeds `max_body_size`
/// - `Xml` if the body is not UTF-8, or from [`parse_sitemap_locations`]
/// - `EmptySitemap` from [`parse_sitemap_locations`]
pub async fn fetch_sitemap(
    client: &reqwest::Client,
    url: &str,
    max_body_size: usize,
) -> Result<Vec<String>, OperationError> {
    let target = require_http_url(url)?;

    let mut response = client.get(target).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(OperationError::UpstreamStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
        });
    }

    if let Some(declared) = response.content_length() {
        if declared > max_body_size as u64 {
            return Err(OperationError::BodyTooLarge {
                size: declared,
                limit: max_body_size,
            });
        }
    }

    // Read chunk by chunk so an undeclared oversized body is cut off early
    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        if body.len() + chunk.len() > max_body_size {
            return Err(OperationError::BodyTooLarge {
                size: (body.len() + chunk.len()) as u64,
                limit: max_body_size,
            });
        }
        body.extend_from_slice(&chunk);
    }
    debug!("Fetched sitemap {} ({} bytes)", url, body.len());

    let xml = decode_body(body)?;
    parse_sitemap_locations(&xml)
}

/// Decodes a sitemap body as UTF-8, the only encoding the sitemap protocol allows.
fn decode_body(body: Vec<u8>) -> Result<String, OperationError> {
    String::from_utf8(body).map_err(|e| {
        OperationError::Xml(format!(
            "body is not valid UTF-8 (invalid byte at offset {})",
            e.utf8_error().valid_up_to()
        ))
    })
}

/// Extracts the trimmed text of every `loc` element in `xml`.
///
/// Text and CDATA content are both collected, entity references are unescaped,
/// and text of nested elements counts toward the enclosing `loc`.
///
/// # Errors
///
/// - `Xml` if the document is not well-formed (mismatched or unclosed tags,
///   unknown entities, no root element)
/// - `EmptySitemap` if the document holds no `loc` element
pub fn parse_sitemap_locations(xml: &str) -> Result<Vec<String>, OperationError> {
    let mut reader = Reader::from_str(xml.trim_start_matches('\u{feff}'));

    let mut locations: Vec<String> = Vec::new();
    // (element depth, index into `locations`) for every open loc element
    let mut open_locs: Vec<(usize, usize)> = Vec::new();
    let mut depth = 0usize;
    let mut saw_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            OperationError::Xml(format!(
                "error at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                depth += 1;
                saw_root = true;
                if start.name().as_ref() == LOC_TAG {
                    open_locs.push((depth, locations.len()));
                    locations.push(String::new());
                }
            }
            Event::End(_) => {
                if let Some(&(loc_depth, _)) = open_locs.last() {
                    if loc_depth == depth {
                        open_locs.pop();
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Empty(empty) => {
                saw_root = true;
                if empty.name().as_ref() == LOC_TAG {
                    locations.push(String::new());
                }
            }
            Event::Text(text) => {
                if !open_locs.is_empty() {
                    let text = text
                        .unescape()
                        .map_err(|e| OperationError::Xml(e.to_string()))?;
                    append_to_open(&mut locations, &open_locs, &text);
                }
            }
            Event::CData(cdata) => {
                if !open_locs.is_empty() {
                    let raw = cdata.into_inner();
                    append_to_open(&mut locations, &open_locs, &String::from_utf8_lossy(&raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth > 0 {
        return Err(OperationError::Xml(format!(
            "unexpected end of document with {depth} unclosed element(s)"
        )));
    }
    if !saw_root {
        return Err(OperationError::Xml("document has no root element".to_string()));
    }
    if locations.is_empty() {
        return Err(OperationError::EmptySitemap);
    }

    Ok(locations
        .into_iter()
        .map(|location| location.trim().to_string())
        .collect())
}

fn append_to_open(locations: &mut [String], open_locs: &[(usize, usize)], text: &str) {
    for &(_, index) in open_locs {
        locations[index].push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_SITEMAP_BODY_SIZE;

    const URLSET: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-01-01</lastmod>
  </url>
  <url>
    <loc>
      https://example.com/about
    </loc>
  </url>
  <url><loc>https://example.com/search?q=a&amp;page=2</loc></url>
</urlset>"#;

    #[test]
    fn test_parse_urlset_in_document_order() {
        let urls = parse_sitemap_locations(URLSET).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/",
                "https://example.com/about",
                "https://example.com/search?q=a&page=2",
            ]
        );
    }

    #[test]
    fn test_parse_sitemap_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
            <sitemap><loc>https://example.com/sitemap-2.xml</loc></sitemap>
        </sitemapindex>"#;
        let urls = parse_sitemap_locations(xml).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/sitemap-1.xml",
                "https://example.com/sitemap-2.xml"
            ]
        );
    }

    #[test]
    fn test_cdata_location() {
        let xml = "<urlset><url><loc><![CDATA[ https://example.com/a?x=1&y=2 ]]></loc></url></urlset>";
        let urls = parse_sitemap_locations(xml).unwrap();
        assert_eq!(urls, vec!["https://example.com/a?x=1&y=2"]);
    }

    #[test]
    fn test_tag_match_is_case_sensitive_and_unprefixed() {
        let xml = r#"<urlset xmlns:image="http://www.google.com/schemas/sitemap-image/1.1">
            <url>
              <loc>https://example.com/page</loc>
              <LOC>https://example.com/upper</LOC>
              <image:image><image:loc>https://example.com/photo.jpg</image:loc></image:image>
            </url>
        </urlset>"#;
        let urls = parse_sitemap_locations(xml).unwrap();
        assert_eq!(urls, vec!["https://example.com/page"]);
    }

    #[test]
    fn test_zero_locations_is_an_error() {
        let xml = r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#;
        let err = parse_sitemap_locations(xml).unwrap_err();
        assert!(matches!(err, OperationError::EmptySitemap));
    }

    #[test]
    fn test_mismatched_tags_are_rejected() {
        let xml = "<urlset><url><loc>https://example.com/</url></loc></urlset>";
        let err = parse_sitemap_locations(xml).unwrap_err();
        assert!(matches!(err, OperationError::Xml(_)));
    }

    #[test]
    fn test_unclosed_document_is_rejected() {
        let xml = "<urlset><url><loc>https://example.com/</loc>";
        let err = parse_sitemap_locations(xml).unwrap_err();
        assert!(matches!(err, OperationError::Xml(_)));
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let err = parse_sitemap_locations("").unwrap_err();
        assert!(matches!(err, OperationError::Xml(_)));
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let xml = "\u{feff}<urlset><url><loc>https://example.com/</loc></url></urlset>";
        assert_eq!(
            parse_sitemap_locations(xml).unwrap(),
            vec!["https://example.com/"]
        );
    }

    #[test]
    fn test_many_locations_keep_count_and_order() {
        let mut xml = String::from("<urlset>");
        for i in 0..250 {
            xml.push_str(&format!("<url><loc> https://example.com/{i} </loc></url>"));
        }
        xml.push_str("</urlset>");

        let urls = parse_sitemap_locations(&xml).unwrap();
        assert_eq!(urls.len(), 250);
        assert_eq!(urls[0], "https://example.com/0");
        assert_eq!(urls[249], "https://example.com/249");
    }

    #[test]
    fn test_decode_body_rejects_latin1() {
        // "café" in ISO-8859-1
        let body = b"<urlset><url><loc>https://example.com/caf\xe9</loc></url></urlset>".to_vec();
        let err = decode_body(body).unwrap_err();
        assert!(matches!(err, OperationError::Xml(_)));
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn test_decode_body_keeps_utf8() {
        let body = "<loc>https://example.com/café</loc>".as_bytes().to_vec();
        assert_eq!(decode_body(body).unwrap(), "<loc>https://example.com/café</loc>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_http_scheme_without_request() {
        let client = reqwest::Client::new();
        let err = fetch_sitemap(&client, "ftp://example.com/sitemap.xml", MAX_SITEMAP_BODY_SIZE)
            .await
            .unwrap_err();
        assert!(matches!(err, OperationError::InvalidInput(_)));
    }
}
