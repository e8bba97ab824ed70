//! HTTP server adapter.
//!
//! Every path is handed to the router, so route matching stays a substring
//! match exactly as for function events. Repeated `url` query values are
//! comma-joined before the router sees them.

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response as HttpResponse};
use log::info;
use tokio::net::TcpListener;

use crate::config::URL_QUERY_PARAM;
use crate::models::{Request, Response};
use crate::router::RequestRouter;

/// Builds the axum application serving the router.
pub fn build_app(router: RequestRouter) -> axum::Router {
    axum::Router::new()
        .fallback(handle_request)
        .with_state(router)
}

/// Binds `bind:port` and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(bind: &str, port: u16, router: RequestRouter) -> Result<(), anyhow::Error> {
    let listener = TcpListener::bind(format!("{}:{}", bind, port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}:{}: {}", bind, port, e))?;

    serve_on(listener, router).await
}

/// Serves on an already bound listener until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_on(listener: TcpListener, router: RequestRouter) -> Result<(), anyhow::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}/", addr);
        info!("  - Sitemap: http://{}/fetch-sitemap?url=...", addr);
        info!("  - Trim: http://{}/trim-url?url=...", addr);
        info!("  - Redirects: http://{}/check-redirect?url=...", addr);
    }

    axum::serve(listener, build_app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, stopping server");
    }
}

async fn handle_request(State(router): State<RequestRouter>, uri: Uri) -> HttpResponse {
    let request = Request::new(uri.path(), url_parameter(uri.query()));
    into_http_response(router.handle(request).await)
}

/// Collects every `url` value of a raw query string, comma-joined.
fn url_parameter(query: Option<&str>) -> Option<String> {
    let values: Vec<String> = url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(key, _)| key == URL_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

fn into_http_response(response: Response) -> HttpResponse {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        response.body_text(),
    )
        .into_response()
}
