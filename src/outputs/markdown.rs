//! Markdown rendering of the weekly digest.
//!
//! The template file is plain text split by `---` into three parts:
//!
//! ```text
//! # My reading list      <- header
//! ---
//! (ignored)               <- body placeholder
//! ---
//! Generated weekly.       <- footer
//! ```
//!
//! The rendered document is the header, one section per week, then the footer:
//!
//! ```text
//! # My reading list
//!
//! ## Week: 2025-02
//!
//! - 2025-01-08 @ example.com: [Title](https://example.com/post)
//!
//! Generated weekly.
//! ```

use crate::error::TemplateError;
use crate::models::{Article, WeekKey};
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::{debug, instrument};

const DELIMITER: &str = "---";

/// Header and footer text surrounding the weekly sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub header: String,
    pub footer: String,
}

impl Template {
    /// Split template text on the first two `---` delimiters.
    ///
    /// Any later `---` is kept verbatim in the footer.
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let parts: Vec<&str> = text.splitn(3, DELIMITER).collect();
        if parts.len() != 3 {
            return Err(TemplateError::MissingDelimiters {
                found: parts.len() - 1,
            });
        }

        Ok(Self {
            header: parts[0].trim().to_string(),
            footer: parts[2].trim().to_string(),
        })
    }
}

/// Read and parse a template file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_template(path: &Path) -> Result<Template, TemplateError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    let template = Template::parse(&text)?;
    debug!(
        header_bytes = template.header.len(),
        footer_bytes = template.footer.len(),
        "Loaded template"
    );
    Ok(template)
}

/// Render the digest document.
///
/// Week sections appear exactly in `weeks` order. Weeks with no articles
/// are left out. Within a week, articles are listed oldest first; articles
/// with equal timestamps keep their bucket order.
pub fn render(
    template: &Template,
    buckets: &HashMap<WeekKey, Vec<Article>>,
    weeks: &[WeekKey],
) -> String {
    Digest {
        template,
        buckets,
        weeks,
    }
    .to_string()
}

struct Digest<'a> {
    template: &'a Template,
    buckets: &'a HashMap<WeekKey, Vec<Article>>,
    weeks: &'a [WeekKey],
}

impl fmt::Display for Digest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n", self.template.header)?;

        for week in self.weeks {
            let Some(articles) = self.buckets.get(week).filter(|a| !a.is_empty()) else {
                continue;
            };

            writeln!(f, "## Week: {week}\n")?;
            for article in articles.iter().sorted_by_key(|a| a.publish_at) {
                writeln!(
                    f,
                    "- {} @ {}: [{}]({})",
                    article.publish_at.format("%Y-%m-%d"),
                    article.url_domain,
                    article.title,
                    article.url
                )?;
            }
            writeln!(f)?;
        }

        writeln!(f, "{}", self.template.footer)
    }
}
