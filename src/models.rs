//! Data models shared by the fetch, grouping, and rendering stages.
//!
//! - [`Article`]: one feed item, normalized to a UTC publish instant
//! - [`WeekKey`]: the `YYYY-WW` ISO week identifier articles are grouped by

use crate::utils::extract_domain;
use chrono::{DateTime, Datelike, Utc};
use std::fmt;

/// A single article collected from a feed.
///
/// Articles are built once by the fetcher and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// When the article was published, in UTC.
    pub publish_at: DateTime<Utc>,
    /// The article title as given by the feed (may be empty).
    pub title: String,
    /// Link to the article.
    pub url: String,
    /// Domain label derived from `url`; empty if none could be extracted.
    pub url_domain: String,
}

impl Article {
    /// Build an article, deriving `url_domain` from the link.
    pub fn new(title: impl Into<String>, url: impl Into<String>, publish_at: DateTime<Utc>) -> Self {
        let url = url.into();
        let url_domain = extract_domain(&url);
        Self {
            publish_at,
            title: title.into(),
            url,
            url_domain,
        }
    }

    /// The ISO week this article belongs to.
    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_datetime(&self.publish_at)
    }
}

/// ISO-8601 week identifier in `YYYY-WW` form, e.g. `2025-01`.
///
/// The year is the ISO week-numbering year, which differs from the calendar
/// year around New Year. The week is zero-padded so string order matches
/// chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekKey(String);

impl WeekKey {
    pub fn from_datetime(at: &DateTime<Utc>) -> Self {
        let week = at.iso_week();
        WeekKey(format!("{}-{:02}", week.year(), week.week()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
