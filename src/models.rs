//! Request and response values exchanged with the router.

use serde::Serialize;
use serde_json::{json, Value};

/// A normalized invocation: the route plus the raw `url` parameter.
///
/// Host adapters build this from whatever their transport delivers (query
/// string, function event, CLI flags); repeated `url` values arrive already
/// comma-joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Path-like identifier selecting the operation
    pub route: String,
    /// Raw `url` parameter, absent when the caller sent none
    pub url: Option<String>,
}

impl Request {
    pub fn new(route: impl Into<String>, url: Option<String>) -> Self {
        Self {
            route: route.into(),
            url,
        }
    }
}

/// Status code plus JSON body. Every invocation ends in exactly one of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status_code: u16, body: Value) -> Self {
        Self { status_code, body }
    }

    /// 200 response with `body` serialized to JSON.
    ///
    /// Falls back to a 500 error response if serialization fails, so callers
    /// always get a well-formed value.
    pub fn ok<T: Serialize>(body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => Self::new(200, value),
            Err(e) => Self::error(500, &format!("Failed to serialize response: {e}")),
        }
    }

    /// `{ "error": message }` with the given status.
    pub fn error(status_code: u16, message: &str) -> Self {
        Self::new(status_code, json!({ "error": message }))
    }

    /// The body rendered as compact JSON text.
    pub fn body_text(&self) -> String {
        self.body.to_string()
    }

    /// The `error` field of the body, if this is an error response.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}
