//! Function event adapter.
//!
//! Accepts the event shape serverless platforms hand to an HTTP-triggered
//! function and turns it into a `Request`; renders a `Response` as
//! `{statusCode, body}` with the body as JSON text.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::URL_QUERY_PARAM;
use crate::models::{Request, Response};
use crate::router::RequestRouter;

/// A query parameter value as platforms deliver it: one string or several.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl QueryValue {
    /// Collapses the value to one string; several values are comma-joined.
    fn into_joined(self) -> Option<String> {
        match self {
            QueryValue::Single(value) => Some(value),
            QueryValue::Many(values) if values.is_empty() => None,
            QueryValue::Many(values) => Some(values.join(",")),
        }
    }
}

/// HTTP-triggered function event.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub raw_path: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, Option<QueryValue>>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<HashMap<String, Option<Vec<String>>>>,
}

impl FunctionEvent {
    /// Parses an event from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Normalizes the event into a `Request`.
    ///
    /// The route is `path`, then `rawPath`, then `/`. The `url` parameter is
    /// taken from `queryStringParameters`, falling back to
    /// `multiValueQueryStringParameters`; multiple values are comma-joined.
    pub fn into_request(self) -> Request {
        let route = self
            .path
            .or(self.raw_path)
            .unwrap_or_else(|| "/".to_string());

        let single = self
            .query_string_parameters
            .and_then(|mut params| params.remove(URL_QUERY_PARAM))
            .flatten()
            .and_then(QueryValue::into_joined);

        let url = single.or_else(|| {
            self.multi_value_query_string_parameters
                .and_then(|mut params| params.remove(URL_QUERY_PARAM))
                .flatten()
                .and_then(|values| QueryValue::Many(values).into_joined())
        });

        Request::new(route, url)
    }
}

/// What the function returns to its host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub status_code: u16,
    /// JSON text of the response body
    pub body: String,
}

impl From<Response> for FunctionResult {
    fn from(response: Response) -> Self {
        Self {
            status_code: response.status_code,
            body: response.body_text(),
        }
    }
}

/// Runs one event through the router.
pub async fn invoke(router: &RequestRouter, event: FunctionEvent) -> FunctionResult {
    router.handle(event.into_request()).await.into()
}
