//! Command-line options.
//!
//! This struct is generated by `clap` from the field attributes. Every global
//! option can also be supplied through its environment variable, which is how a
//! function-as-a-service deployment configures the binary.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::config::constants::{
    DEFAULT_BIND_ADDRESS, DEFAULT_PORT, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    MAX_REDIRECT_HOPS, MAX_SITEMAP_BODY_SIZE,
};
use crate::config::types::{Config, LogFormat, LogLevel, TrimMode, UrlValidation};

/// Command-line options and configuration.
///
/// # Examples
///
/// ```bash
/// # Serve the three routes over HTTP
/// url_toolbox serve --port 8080
///
/// # One-shot invocation
/// url_toolbox invoke --route /check-redirect --url http://example.com
///
/// # Replay a function event from stdin
/// echo '{"path":"/trim-url","queryStringParameters":{"url":"https://a.b.example.com"}}' \
///     | url_toolbox invoke --event -
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "url_toolbox",
    version,
    about = "Sitemap URL extraction, URL trimming and redirect chain inspection."
)]
pub struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "URL_TOOLBOX_LOG_LEVEL", global = true)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, env = "URL_TOOLBOX_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "URL_TOOLBOX_TIMEOUT_SECONDS", global = true)]
    pub timeout_seconds: u64,

    /// Maximum redirect hops inspected by check-redirect
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS, env = "URL_TOOLBOX_MAX_REDIRECT_HOPS", global = true)]
    pub max_redirect_hops: usize,

    /// Maximum sitemap body size in bytes
    #[arg(long, default_value_t = MAX_SITEMAP_BODY_SIZE, env = "URL_TOOLBOX_MAX_SITEMAP_BODY_SIZE", global = true)]
    pub max_sitemap_body_size: usize,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT, env = "URL_TOOLBOX_USER_AGENT", global = true)]
    pub user_agent: String,

    /// Trim reduction: root-domain|origin
    #[arg(long, value_enum, default_value_t = TrimMode::RootDomain, env = "URL_TOOLBOX_TRIM_MODE", global = true)]
    pub trim_mode: TrimMode,

    /// URL parameter validation: presence|strict
    #[arg(long, value_enum, default_value_t = UrlValidation::Strict, env = "URL_TOOLBOX_URL_VALIDATION", global = true)]
    pub url_validation: UrlValidation,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the routes over HTTP
    Serve(ServeArgs),
    /// Run a single invocation and print `{statusCode, body}`
    Invoke(InvokeArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = DEFAULT_BIND_ADDRESS, env = "URL_TOOLBOX_BIND")]
    pub bind: String,

    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT, env = "PORT")]
    pub port: u16,
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("source").required(true).args(["route", "event"])))]
pub struct InvokeArgs {
    /// Route to invoke, e.g. `/fetch-sitemap`
    #[arg(long, conflicts_with = "event")]
    pub route: Option<String>,

    /// Value of the `url` parameter
    #[arg(long, requires = "route")]
    pub url: Option<String>,

    /// Function event JSON file (`-` reads stdin)
    #[arg(long, value_name = "FILE")]
    pub event: Option<PathBuf>,
}

impl Cli {
    /// Builds the library configuration from the parsed options.
    pub fn to_config(&self) -> Config {
        Config {
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
            timeout_seconds: self.timeout_seconds,
            max_redirect_hops: self.max_redirect_hops,
            max_sitemap_body_size: self.max_sitemap_body_size,
            user_agent: self.user_agent.clone(),
            trim_mode: self.trim_mode,
            url_validation: self.url_validation,
        }
    }
}
