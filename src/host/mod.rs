//! Host adapters.
//!
//! Both adapters only translate between a transport and the router's
//! `Request`/`Response` values:
//! - `event`: serverless function events (`{path, queryStringParameters}`)
//! - `server`: an axum HTTP server

pub mod event;
pub mod server;

pub use event::{invoke, FunctionEvent, FunctionResult, QueryValue};
pub use server::{build_app, serve, serve_on};
