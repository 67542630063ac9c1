//! Grouping of articles into ISO-week buckets.

use crate::models::{Article, WeekKey};
use itertools::Itertools;
use std::collections::HashMap;

/// Articles grouped by [`WeekKey`], plus the order in which weeks were first seen.
///
/// Every key in the bucket map also appears exactly once in the week index.
/// Articles inside a bucket keep insertion (fetch) order; sorting them is the
/// renderer's job.
#[derive(Debug, Default)]
pub struct WeekAggregator {
    buckets: HashMap<WeekKey, Vec<Article>>,
    weeks: Vec<WeekKey>,
}

impl WeekAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the output of several feeds, in declared feed order.
    pub fn group_articles<I>(articles_per_feed: I) -> Self
    where
        I: IntoIterator<Item = Vec<Article>>,
    {
        let mut aggregator = Self::new();
        for articles in articles_per_feed {
            aggregator.extend(articles);
        }
        aggregator
    }

    /// Append an article to its week's bucket, registering the week if new.
    pub fn add_article(&mut self, article: Article) {
        let key = article.week_key();
        match self.buckets.get_mut(&key) {
            Some(bucket) => bucket.push(article),
            None => {
                self.weeks.push(key.clone());
                self.buckets.insert(key, vec![article]);
            }
        }
    }

    pub fn extend<I>(&mut self, articles: I)
    where
        I: IntoIterator<Item = Article>,
    {
        for article in articles {
            self.add_article(article);
        }
    }

    pub fn buckets(&self) -> &HashMap<WeekKey, Vec<Article>> {
        &self.buckets
    }

    /// Distinct weeks in first-seen order.
    pub fn weeks(&self) -> &[WeekKey] {
        &self.weeks
    }

    /// Distinct weeks, most recent first.
    pub fn weeks_descending(&self) -> Vec<WeekKey> {
        self.weeks.iter().sorted().rev().cloned().collect()
    }

    pub fn article_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}
