//! Helpers for labelling articles with the site they came from.
//!
//! [`extract_domain`] turns a link (or a bare host) into the short domain
//! label shown next to each article in the digest.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("valid scheme regex"));
static DOMAIN: Lazy<Regex> = Lazy::new(|| Regex::new(r"([a-z0-9-]+\.)+[a-z0-9-]+").expect("valid domain regex"));

/// Extract a bare domain label from a URL or URL-like string.
///
/// The steps are applied in order:
/// - Surrounding whitespace is trimmed and the input is lowercased.
/// - If it starts with `http://` or `https://`, it is parsed as a URL and
///   replaced with its host. A string that fails to parse is kept as-is.
/// - A leading `www.` is removed.
/// - The first `label.label[.label…]` substring is returned.
///
/// Inputs with no domain-shaped substring yield an empty string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(extract_domain("https://www.example.com/path"), "example.com");
/// assert_eq!(extract_domain("example.com"), "example.com");
/// assert_eq!(extract_domain("not a url"), "");
/// ```
pub fn extract_domain(input: &str) -> String {
    let trimmed = input.trim().to_lowercase();

    let host = if SCHEME.is_match(&trimmed) {
        match Url::parse(&trimmed) {
            Ok(parsed) => parsed.host_str().map(str::to_string),
            Err(e) => {
                tracing::debug!(input = %trimmed, error = %e, "URL parse failed; matching raw input");
                None
            }
        }
    } else {
        None
    };
    let working = host.unwrap_or(trimmed);
    let working = working.strip_prefix("www.").unwrap_or(working.as_str());

    DOMAIN
        .find(working)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
