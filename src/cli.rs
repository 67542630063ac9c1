//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Collect feed articles and render them as a Markdown digest grouped by ISO week.
///
/// # Examples
///
/// ```sh
/// # Read ./config.yaml
/// weekly_feeds
///
/// # Explicit config, output written somewhere else
/// weekly_feeds -c feeds/config.yaml -o /tmp/digest.md
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Write the digest here instead of the config's `output` path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
