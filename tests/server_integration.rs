//! Integration tests for the HTTP server adapter.
//!
//! Each test starts the server on a random port and talks to it with reqwest.

mod helpers;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{start_toolbox_server, test_router};

async fn get(url: &str) -> (u16, Option<String>, Value) {
    let response = reqwest::get(url).await.expect("Request to server failed");
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let text = response.text().await.expect("Failed to read body");
    let body = serde_json::from_str::<Value>(&text).expect("Body is not JSON");
    (status, content_type, body)
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let base = start_toolbox_server(test_router()).await;

    let (status, content_type, body) = get(&format!("{base}/nope?url=https://example.com")).await;

    assert_eq!(status, 404);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    assert_eq!(body, json!({ "error": "Invalid API endpoint" }));
}

#[tokio::test]
async fn test_missing_url_is_400() {
    let base = start_toolbox_server(test_router()).await;

    let (status, _, body) = get(&format!("{base}/trim-url")).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "No URL provided" }));
}

#[tokio::test]
async fn test_trim_url_list() {
    let base = start_toolbox_server(test_router()).await;

    let (status, _, body) = get(&format!(
        "{base}/trim-url?url=https://a.b.example.com/x,https://c.example.org"
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!([
            { "original": "https://a.b.example.com/x", "trimmed": "example.com" },
            { "original": "https://c.example.org", "trimmed": "example.org" }
        ])
    );
}

#[tokio::test]
async fn test_repeated_url_parameters_are_joined() {
    let base = start_toolbox_server(test_router()).await;

    let (status, _, body) = get(&format!(
        "{base}/trim-url?url=https://a.example.com&url=https://b.example.net"
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body[0]["trimmed"], "example.com");
    assert_eq!(body[1]["trimmed"], "example.net");
}

#[tokio::test]
async fn test_route_matched_as_substring_of_prefixed_path() {
    let base = start_toolbox_server(test_router()).await;

    let (status, _, body) = get(&format!(
        "{base}/.netlify/functions/api/trim-url?url=https://www.example.com"
    ))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body[0]["trimmed"], "example.com");
}

#[tokio::test]
async fn test_check_redirect_over_http() {
    let target = MockServer::start().await;
    let landing = format!("{}/landing", target.uri());
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", landing.as_str()))
        .mount(&target)
        .await;
    Mock::given(method("GET"))
        .and(path("/landing"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&target)
        .await;

    let base = start_toolbox_server(test_router()).await;
    let start = format!("{}/start", target.uri());
    let mut request = reqwest::Url::parse(&format!("{base}/check-redirect")).expect("valid URL");
    request.query_pairs_mut().append_pair("url", &start);

    let (status, _, body) = get(request.as_str()).await;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "originalUrl": start,
            "redirectCount": 1,
            "redirectChain": [landing],
            "finalUrl": landing
        })
    );
}

#[tokio::test]
async fn test_invalid_single_url_is_400() {
    let base = start_toolbox_server(test_router()).await;

    let (status, _, body) = get(&format!("{base}/check-redirect?url=not-a-url")).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid URL" }));
}
