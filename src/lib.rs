//! url_toolbox library: three stateless HTTP utility operations behind one router.
//!
//! - `fetch-sitemap`: download a sitemap and list its `<loc>` values
//! - `trim-url`: reduce one or more URLs to their root domain or origin
//! - `check-redirect`: follow a redirect chain hop by hop and report it
//!
//! A host (HTTP server, function runtime, CLI) builds a [`Request`], hands it
//! to a [`RequestRouter`] and gets a [`Response`] back. The router never fails:
//! operation errors and panics come back as 500 responses.
//!
//! # Example
//!
//! ```no_run
//! use url_toolbox::{init_context, Config, Request, RequestRouter};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let router = RequestRouter::new(init_context(&Config::default())?);
//! let response = router
//!     .handle(Request::new("/check-redirect", Some("http://example.com".to_string())))
//!     .await;
//! println!("{} {}", response.status_code, response.body_text());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod config;
pub mod error_handling;
pub mod host;
pub mod initialization;
mod models;
pub mod operations;
mod router;
pub mod validation;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, TrimMode, UrlValidation};
pub use error_handling::{ErrorType, OperationError};
pub use initialization::init_context;
pub use models::{Request, Response};
pub use router::{Operation, RequestRouter};
