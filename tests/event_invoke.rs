//! Integration tests for the function event adapter.

mod helpers;

use std::io::Write;

use serde_json::{json, Value};
use tempfile::NamedTempFile;
use url_toolbox::host::{self, FunctionEvent};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{test_router, urlset};

fn body_json(body: &str) -> Value {
    serde_json::from_str(body).expect("Function body is not JSON")
}

#[tokio::test]
async fn test_event_file_round_trip() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        file,
        r#"{{"path":"/.netlify/functions/api/trim-url","queryStringParameters":{{"url":"https://shop.example.co.uk/cart"}}}}"#
    )
    .expect("Failed to write event");

    let text = std::fs::read_to_string(file.path()).expect("Failed to read event");
    let event = FunctionEvent::from_json(&text).expect("Invalid event JSON");
    let result = host::invoke(&test_router(), event).await;

    assert_eq!(result.status_code, 200);
    assert_eq!(
        body_json(&result.body),
        json!([{ "original": "https://shop.example.co.uk/cart", "trimmed": "co.uk" }])
    );
}

#[tokio::test]
async fn test_event_without_parameters() {
    let event = FunctionEvent::from_json(r#"{"path":"/fetch-sitemap"}"#).expect("Invalid event");

    let result = host::invoke(&test_router(), event).await;

    assert_eq!(result.status_code, 400);
    assert_eq!(body_json(&result.body), json!({ "error": "No URL provided" }));
}

#[tokio::test]
async fn test_event_fetch_sitemap() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&[
            "https://example.com/a",
            "https://example.com/b",
        ])))
        .mount(&mock_server)
        .await;

    let event_json = json!({
        "rawPath": "/fetch-sitemap",
        "queryStringParameters": { "url": format!("{}/sitemap.xml", mock_server.uri()) }
    });
    let event = FunctionEvent::from_json(&event_json.to_string()).expect("Invalid event");

    let result = host::invoke(&test_router(), event).await;

    assert_eq!(result.status_code, 200);
    assert_eq!(
        body_json(&result.body),
        json!({ "urls": ["https://example.com/a", "https://example.com/b"] })
    );
}

#[tokio::test]
async fn test_event_unknown_route() {
    let event = FunctionEvent::from_json(
        r#"{"path":"/api/unknown","queryStringParameters":{"url":"https://example.com"}}"#,
    )
    .expect("Invalid event");

    let result = host::invoke(&test_router(), event).await;

    assert_eq!(result.status_code, 404);
    assert_eq!(result.body, r#"{"error":"Invalid API endpoint"}"#);
}
