//! Feed retrieval and normalization.
//!
//! A feed source is an opaque string. HTTP(S) URLs are downloaded with a
//! single GET request; anything else is treated as a path to a feed file on
//! disk. Either way the bytes are handed to `feed-rs`, which understands
//! RSS, Atom, and JSON Feed, and each entry becomes an [`Article`].
//!
//! # Entry Policy
//!
//! - The publish instant is the entry's `published` date, falling back to
//!   `updated`. Entries with neither are skipped.
//! - The link is the first `rel="alternate"` link, else the first link.
//!   Entries without any link are skipped.
//! - Skips are logged with `warn!`; they never fail the whole feed.

use crate::error::FetchError;
use crate::models::Article;
use chrono::Utc;
use feed_rs::model::Entry;
use feed_rs::parser;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Something that can turn a feed source into articles.
///
/// The production implementation is [`HttpFeedFetcher`]; tests substitute
/// in-memory fetchers.
pub trait FetchFeed {
    /// Fetch and parse one feed source. One attempt, no retries.
    async fn fetch_articles(&self, source: &str) -> Result<Vec<Article>, FetchError>;
}

/// Fetches feeds over HTTP(S), or from the local filesystem.
#[derive(Debug, Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn download(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }
        let body = response.bytes().await?;
        debug!(bytes = body.len(), %status, "Downloaded feed");
        Ok(body.to_vec())
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        tokio::fs::read(path).await.map_err(|source| FetchError::Read {
            path: PathBuf::from(path),
            source,
        })
    }
}

impl FetchFeed for HttpFeedFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch_articles(&self, source: &str) -> Result<Vec<Article>, FetchError> {
        let body = if is_http_source(source) {
            self.download(source).await?
        } else {
            self.read_file(source).await?
        };
        parse_feed(&body)
    }
}

fn is_http_source(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Parse raw feed bytes into articles, in feed order.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Article>, FetchError> {
    let feed = parser::parse(body)?;
    let total = feed.entries.len();

    let articles: Vec<Article> = feed.entries.into_iter().filter_map(entry_to_article).collect();

    info!(
        entries = total,
        articles = articles.len(),
        skipped = total - articles.len(),
        "Parsed feed"
    );
    Ok(articles)
}

fn entry_to_article(entry: Entry) -> Option<Article> {
    let Some(link) = entry
        .links
        .iter()
        .find(|l| l.rel.as_deref() == Some("alternate"))
        .or_else(|| entry.links.first())
        .map(|l| l.href.clone())
    else {
        warn!(id = %entry.id, "Feed entry has no link; skipping");
        return None;
    };

    let Some(publish_at) = entry.published.or(entry.updated) else {
        warn!(id = %entry.id, %link, "Feed entry has no publish date; skipping");
        return None;
    };

    let title = entry.title.map(|t| t.content).unwrap_or_default();
    Some(Article::new(title, link, publish_at.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;
    use std::io::Write;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <link>https://example.com</link>
    <description>Example feed</description>
    <item>
      <title>First post</title>
      <link>https://www.example.com/first</link>
      <pubDate>Thu, 02 Jan 2025 10:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Undated post</title>
      <link>https://example.com/undated</link>
    </item>
    <item>
      <title>Second post</title>
      <link>https://blog.example.org/second</link>
      <pubDate>Mon, 30 Dec 2024 09:30:00 +0200</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom Example</title>
  <id>urn:example:feed</id>
  <updated>2025-01-10T00:00:00Z</updated>
  <entry>
    <title>Only updated</title>
    <id>urn:example:1</id>
    <link rel="replies" href="https://example.net/1/comments"/>
    <link rel="alternate" href="https://example.net/1"/>
    <updated>2025-01-09T08:00:00Z</updated>
  </entry>
  <entry>
    <title>Published too</title>
    <id>urn:example:2</id>
    <link href="https://example.net/2"/>
    <published>2025-01-05T07:00:00Z</published>
    <updated>2025-01-08T07:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_rss_skips_undated_entries() {
        let articles = parse_feed(RSS.as_bytes()).unwrap();
        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].title, "First post");
        assert_eq!(articles[0].url, "https://www.example.com/first");
        assert_eq!(articles[0].url_domain, "example.com");
        assert_eq!(
            articles[0].publish_at,
            Utc.with_ymd_and_hms(2025, 1, 2, 10, 0, 0).unwrap()
        );

        assert_eq!(articles[1].title, "Second post");
        assert_eq!(articles[1].url_domain, "blog.example.org");
        assert_eq!(
            articles[1].publish_at,
            Utc.with_ymd_and_hms(2024, 12, 30, 7, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_atom_prefers_alternate_link_and_falls_back_to_updated() {
        let articles = parse_feed(ATOM.as_bytes()).unwrap();
        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].url, "https://example.net/1");
        assert_eq!(
            articles[0].publish_at,
            Utc.with_ymd_and_hms(2025, 1, 9, 8, 0, 0).unwrap()
        );

        assert_eq!(articles[1].url, "https://example.net/2");
        assert_eq!(
            articles[1].publish_at,
            Utc.with_ymd_and_hms(2025, 1, 5, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_invalid_feed() {
        let result = parse_feed(b"this is not a feed");
        assert!(matches!(result, Err(FetchError::Parse(_))));
    }

    #[test]
    fn test_is_http_source() {
        assert!(is_http_source("https://example.com/feed.xml"));
        assert!(is_http_source("HTTP://example.com/rss"));
        assert!(!is_http_source("feeds/local.xml"));
        assert!(!is_http_source("ftp://example.com/feed"));
    }

    #[tokio::test]
    async fn test_fetch_over_http() {
        let server = MockServer::start_async().await;
        let feed_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/feed.xml");
                then.status(200)
                    .header("content-type", "application/rss+xml")
                    .body(RSS);
            })
            .await;

        let fetcher = HttpFeedFetcher::new().unwrap();
        let articles = fetcher.fetch_articles(&server.url("/feed.xml")).await.unwrap();

        feed_mock.assert_async().await;
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_http_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.xml");
                then.status(404);
            })
            .await;

        let fetcher = HttpFeedFetcher::new().unwrap();
        let result = fetcher.fetch_articles(&server.url("/missing.xml")).await;

        match result {
            Err(FetchError::Status { status }) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_from_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ATOM.as_bytes()).unwrap();

        let fetcher = HttpFeedFetcher::new().unwrap();
        let articles = fetcher
            .fetch_articles(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_missing_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.xml");

        let fetcher = HttpFeedFetcher::new().unwrap();
        let result = fetcher.fetch_articles(path.to_str().unwrap()).await;
        assert!(matches!(result, Err(FetchError::Read { .. })));
    }
}
