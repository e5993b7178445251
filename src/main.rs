//! # newsup
//!
//! Terminal front end for the feed pipeline in the `newsup` library: loads
//! the configured Guardian search once (or on every refresh with
//! `--interactive`), prints the items, and optionally saves them as JSON.
//!
//! ## Usage
//!
//! ```sh
//! newsup -s climate -o relevance -j ./out/climate.json
//! ```
//!
//! Log output goes to stderr and honours `RUST_LOG`; stdout carries only the
//! rendered feed.

use clap::Parser;
use newsup::feed::{FeedLoader, FeedSubscription, LoadState};
use newsup::models::{Feed, FetchRequest};
use newsup::outputs::{json, text};
use std::error::Error;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsup starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.json_output, interactive = args.interactive, "Parsed CLI arguments");

    let settings = match args.settings().await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Could not load settings");
            return Err(e.into());
        }
    };
    info!(subject = %settings.subject, order_by = %settings.order_by, "Using settings");

    let loader = FeedLoader::new()?;
    let mut feed = loader.subscribe();

    let request = settings.to_request();
    loader.start(request.clone());
    show_next(&mut feed, &request, args.json_output.as_deref()).await;

    if args.interactive {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            match line.trim() {
                "" | "r" => {
                    let request = settings.to_request();
                    loader.start(request.clone());
                    show_next(&mut feed, &request, args.json_output.as_deref()).await;
                }
                "q" => break,
                other => eprintln!("Unknown command {other:?}: Enter or r refreshes, q quits"),
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(?elapsed, "Execution complete");
    Ok(())
}

/// Wait for the next delivered load, print it, and save it if requested.
#[instrument(level = "info", skip_all)]
async fn show_next(feed: &mut FeedSubscription, request: &FetchRequest, json_output: Option<&Path>) {
    let Some(state) = feed.next_outcome().await else {
        warn!("Loader stopped before delivering a result");
        return;
    };
    print!("{}", text::render(&state));

    if let (Some(path), LoadState::Delivered(items)) = (json_output, &state) {
        let document = Feed::now(request, items.clone());
        if let Err(e) = json::write_feed(&document, path).await {
            error!(path = %path.display(), error = %e, "Failed to write feed JSON");
        }
    }
}
