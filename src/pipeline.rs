//! End-to-end digest run: template, fetch, group, render, write.
//!
//! Feeds are fetched one at a time in the order they are configured. A feed
//! that fails is logged and left out; every other failure aborts the run
//! before the output file is written.

use crate::aggregate::WeekAggregator;
use crate::config::Config;
use crate::error::AppError;
use crate::feeds::FetchFeed;
use crate::models::Article;
use crate::outputs::{file, markdown};
use futures::stream::{self, StreamExt};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Counts reported once a run completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub feeds: usize,
    pub failed_feeds: usize,
    pub articles: usize,
    pub weeks: usize,
    pub output: PathBuf,
}

/// Produce the digest described by `config`, fetching feeds with `fetcher`.
///
/// The template is loaded before any feed is fetched, so a broken template
/// fails fast without network traffic.
#[instrument(level = "info", skip_all, fields(feeds = config.feeds.len()))]
pub async fn run<F: FetchFeed>(config: &Config, fetcher: &F) -> Result<RunSummary, AppError> {
    let template = markdown::load_template(&config.template).await?;

    let fetched: Vec<Option<Vec<Article>>> = stream::iter(&config.feeds)
        .then(|source| async move {
            info!(%source, "Fetching articles");
            match fetcher.fetch_articles(source).await {
                Ok(articles) => {
                    info!(%source, count = articles.len(), "Fetched articles");
                    Some(articles)
                }
                Err(e) => {
                    warn!(%source, error = %e, "Failed to fetch feed; skipping");
                    None
                }
            }
        })
        .collect()
        .await;

    let failed_feeds = fetched.iter().filter(|f| f.is_none()).count();
    let aggregator = WeekAggregator::group_articles(fetched.into_iter().flatten());

    if aggregator.is_empty() {
        warn!("No articles collected from any feed");
    }
    debug!(first_seen = ?aggregator.weeks(), "Week index");

    let weeks = aggregator.weeks_descending();
    info!(
        weeks = weeks.len(),
        articles = aggregator.article_count(),
        "Grouped articles by week"
    );

    let document = markdown::render(&template, aggregator.buckets(), &weeks);
    file::write_document(&config.output, &document).await?;

    Ok(RunSummary {
        feeds: config.feeds.len(),
        failed_feeds,
        articles: aggregator.article_count(),
        weeks: weeks.len(),
        output: config.output.clone(),
    })
}
