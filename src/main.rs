//! # Weekly Feeds
//!
//! Reads a list of RSS/Atom feeds, collects their articles, and writes a
//! single Markdown document listing the articles week by week.
//!
//! ## Usage
//!
//! ```sh
//! weekly_feeds --config config.yaml
//! ```
//!
//! ## Architecture
//!
//! One batch run, strictly sequential:
//! 1. **Configuration**: Load `config.yaml` (template path, output path, feeds)
//! 2. **Template**: Load the header/footer template
//! 3. **Fetching**: Fetch each feed in order; failed feeds are logged and skipped
//! 4. **Grouping**: Bucket articles by ISO week (`YYYY-WW`)
//! 5. **Output**: Render weeks most recent first and write the Markdown file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod error;
mod feeds;
mod models;
mod outputs;
mod pipeline;
mod utils;

use cli::Cli;
use error::AppError;
use feeds::HttpFeedFetcher;

const BUILD_ID: &str = match option_env!("BUILD_ID") {
    Some(id) => id,
    None => "local",
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!(
        version = env!("CARGO_PKG_VERSION"),
        build = BUILD_ID,
        "weekly_feeds starting up"
    );

    let args = Cli::parse();
    debug!(?args.config, ?args.output, "Parsed CLI arguments");

    let mut config = config::load_config(&args.config).await.map_err(|e| {
        error!(error = %e, "Could not load configuration");
        AppError::from(e)
    })?;
    if let Some(output) = args.output {
        info!(path = %output.display(), "Output path overridden from command line");
        config.output = output;
    }

    let fetcher = HttpFeedFetcher::new()?;
    let summary = pipeline::run(&config, &fetcher).await.map_err(|e| {
        error!(error = %e, "Digest run failed");
        e
    })?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        feeds = summary.feeds,
        failed_feeds = summary.failed_feeds,
        articles = summary.articles,
        weeks = summary.weeks,
        path = %summary.output.display(),
        "Execution complete"
    );

    Ok(())
}
