//! Request routing and the top-level failure barrier.
//!
//! The router checks the `url` parameter, picks an operation by substring match
//! on the route and turns whatever the operation produces into a `Response`.
//! Operation errors and panics both stop here as 500 responses.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;
use log::{error, info, warn};

use crate::config::{
    UrlValidation, MSG_INTERNAL_ERROR, MSG_INVALID_ENDPOINT, MSG_INVALID_URL, MSG_NO_URL,
    ROUTE_CHECK_REDIRECT, ROUTE_FETCH_SITEMAP, ROUTE_TRIM_URL,
};
use crate::error_handling::{categorize_reqwest_error, ErrorType, OperationError};
use crate::models::{Request, Response};
use crate::operations::{redirects, sitemap, trim, OperationContext};
use crate::validation::is_fetchable_url;

/// The operations a route can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchSitemap,
    TrimUrl,
    CheckRedirect,
}

impl Operation {
    /// Matching order; the first keyword contained in the route wins.
    const PRIORITY: [Operation; 3] = [
        Operation::FetchSitemap,
        Operation::TrimUrl,
        Operation::CheckRedirect,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            Operation::FetchSitemap => ROUTE_FETCH_SITEMAP,
            Operation::TrimUrl => ROUTE_TRIM_URL,
            Operation::CheckRedirect => ROUTE_CHECK_REDIRECT,
        }
    }

    /// Selects the operation whose keyword appears in `route`.
    pub fn from_route(route: &str) -> Option<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|operation| route.contains(operation.keyword()))
    }

    /// Whether the `url` parameter is one URL rather than a comma-separated list.
    fn takes_single_url(self) -> bool {
        !matches!(self, Operation::TrimUrl)
    }
}

/// Dispatches requests to the operations. Cheap to clone.
#[derive(Clone)]
pub struct RequestRouter {
    ctx: Arc<OperationContext>,
}

impl RequestRouter {
    pub fn new(ctx: Arc<OperationContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &OperationContext {
        &self.ctx
    }

    /// Handles one invocation. Never fails: every outcome is a `Response`.
    pub async fn handle(&self, request: Request) -> Response {
        let started = Instant::now();
        let response = self.dispatch(&request).await;
        info!(
            "{} -> {} ({} ms)",
            request.route,
            response.status_code,
            started.elapsed().as_millis()
        );
        response
    }

    async fn dispatch(&self, request: &Request) -> Response {
        let Some(url) = request
            .url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
        else {
            return Response::error(400, MSG_NO_URL);
        };

        let Some(operation) = Operation::from_route(&request.route) else {
            return Response::error(404, MSG_INVALID_ENDPOINT);
        };

        if operation.takes_single_url()
            && self.ctx.config.url_validation == UrlValidation::Strict
            && !is_fetchable_url(url)
        {
            return Response::error(400, MSG_INVALID_URL);
        }

        let outcome = AssertUnwindSafe(self.run(operation, url))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                log_operation_error(operation, url, &e);
                Response::error(500, &e.to_string())
            }
            Err(panic) => {
                error!(
                    "{:?} panicked for {}: {} ({})",
                    operation,
                    url,
                    panic_message(panic.as_ref()),
                    ErrorType::Internal
                );
                Response::error(500, MSG_INTERNAL_ERROR)
            }
        }
    }

    async fn run(&self, operation: Operation, url: &str) -> Result<Response, OperationError> {
        match operation {
            Operation::FetchSitemap => sitemap::handle(&self.ctx, url).await,
            Operation::TrimUrl => Ok(trim::handle(url, self.ctx.config.trim_mode)),
            Operation::CheckRedirect => redirects::handle(&self.ctx, url).await,
        }
    }
}

fn log_operation_error(operation: Operation, url: &str, e: &OperationError) {
    match e {
        OperationError::Network(source) => warn!(
            "{:?} failed for {} ({}, {}): {}",
            operation,
            url,
            e.error_type(),
            categorize_reqwest_error(source),
            e
        ),
        _ => warn!(
            "{:?} failed for {} ({}): {}",
            operation,
            url,
            e.error_type(),
            e
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}
