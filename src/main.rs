//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `url_toolbox` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading function events and printing results
//!
//! All operation logic is implemented in the library crate.

use std::io::Read;
use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use url_toolbox::config::{Cli, Command, InvokeArgs};
use url_toolbox::host::{self, FunctionEvent};
use url_toolbox::initialization::init_logger_with;
use url_toolbox::{init_context, Request, RequestRouter};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is the normal case
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = cli.to_config();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    config.validate().context("Invalid configuration")?;

    let ctx = init_context(&config).context("Failed to initialize HTTP clients")?;
    let router = RequestRouter::new(ctx);

    let outcome = match cli.command {
        Command::Serve(args) => host::serve(&args.bind, args.port, router).await,
        Command::Invoke(args) => run_invoke(&router, args).await,
    };

    if let Err(e) = outcome {
        eprintln!("url_toolbox error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run_invoke(router: &RequestRouter, args: InvokeArgs) -> Result<()> {
    let result = match args.event {
        Some(path) => {
            let text = read_event(&path)?;
            let event = FunctionEvent::from_json(&text).context("Failed to parse event JSON")?;
            host::invoke(router, event).await
        }
        None => {
            // clap's "source" group guarantees a route when there is no event
            let route = args.route.unwrap_or_default();
            router.handle(Request::new(route, args.url)).await.into()
        }
    };

    let rendered =
        serde_json::to_string_pretty(&result).context("Failed to serialize function result")?;
    println!("{rendered}");
    Ok(())
}

fn read_event(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read event from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))
    }
}
