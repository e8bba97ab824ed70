// Shared test helpers for router setup and throwaway HTTP servers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::time::Duration;

use axum::body::Body;
use axum::response::Redirect;
use axum::routing::get;
use tokio::net::TcpListener;

use url_toolbox::{init_context, Config, LogLevel, RequestRouter};

/// Creates a router with test-friendly settings (short timeout, quiet logs).
#[allow(dead_code)] // Used by other test files
pub fn test_router() -> RequestRouter {
    test_router_with(test_config())
}

/// Creates a router from an explicit config.
#[allow(dead_code)]
pub fn test_router_with(config: Config) -> RequestRouter {
    RequestRouter::new(init_context(&config).expect("Failed to initialize HTTP clients"))
}

/// Config used by most tests.
#[allow(dead_code)]
pub fn test_config() -> Config {
    Config {
        log_level: LogLevel::Error,
        timeout_seconds: 5,
        user_agent: "url_toolbox_test/1.0".to_string(),
        ..Default::default()
    }
}

/// Returns a localhost URL nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");
    drop(listener);
    format!("http://{}/", addr)
}

/// Starts a server whose `/loop` redirects to itself forever.
#[allow(dead_code)]
pub async fn start_redirect_loop_server() -> String {
    let app = axum::Router::new().route("/loop", get(|| async { Redirect::temporary("/loop") }));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Starts a server whose `/sitemap.xml` streams `chunks` without a
/// `Content-Length` header.
#[allow(dead_code)]
pub async fn start_chunked_sitemap_server(chunks: Vec<String>) -> String {
    let app = axum::Router::new().route(
        "/sitemap.xml",
        get(move || {
            let chunks = chunks.clone();
            async move {
                Body::from_stream(futures::stream::iter(
                    chunks.into_iter().map(Ok::<_, std::io::Error>),
                ))
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Starts the url_toolbox HTTP adapter on a random port and returns its base URL.
#[allow(dead_code)]
pub async fn start_toolbox_server(router: RequestRouter) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        let _ = url_toolbox::host::serve_on(listener, router).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://{}", addr)
}

/// Builds a sitemap `urlset` document from a list of locations.
#[allow(dead_code)]
pub fn urlset(locations: &[&str]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );
    for location in locations {
        xml.push_str(&format!("  <url>\n    <loc>{}</loc>\n  </url>\n", location));
    }
    xml.push_str("</urlset>\n");
    xml
}
