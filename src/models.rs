//! Data models for scraped press releases and their tagged representations.
//!
//! This module defines the data structures passed between pipeline stages:
//! - [`Candidate`]: an unvalidated item scraped from the listing page
//! - [`NewsItem`]: a dated, extracted, and ticker-tagged article
//! - [`Skipped`]: an item dropped along the way, with the reason
//! - [`RunReport`]: everything one pipeline run produced

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use url::Url;

/// A listing entry before date resolution and content extraction.
///
/// Only lives between the listing parser and the date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute article URL.
    pub link: Url,
    /// Headline text with the embedded time text removed.
    pub headline: String,
    /// Raw time text as shown on the listing; empty when absent.
    pub raw_time: String,
}

/// A press release that survived the lookback window, with extracted text and
/// the tickers it mentions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    /// Raw time text from the listing page.
    pub raw_time: String,
    pub published_date: NaiveDate,
    /// `false` when `published_date` was defaulted to the run date because the
    /// listing carried no parseable date.
    pub date_known: bool,
    pub link: Url,
    /// Extracted article text, or the headline when extraction produced nothing.
    pub content: String,
    pub symbols: BTreeSet<String>,
}

/// Why an item did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SkipReason {
    /// The listing element had no anchor with a non-empty href.
    MissingLink,
    /// The href could not be resolved against the base URL.
    UnresolvableLink { error: String },
    /// The resolved date falls before the lookback cutoff.
    OutsideWindow {
        published_date: NaiveDate,
        cutoff: NaiveDate,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingLink => write!(f, "no link in listing element"),
            SkipReason::UnresolvableLink { error } => write!(f, "unresolvable link: {error}"),
            SkipReason::OutsideWindow {
                published_date,
                cutoff,
            } => write!(f, "published {published_date}, before cutoff {cutoff}"),
        }
    }
}

/// An item dropped by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    /// The link when known, otherwise a short description of the element.
    pub subject: String,
    pub reason: SkipReason,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Tagged articles, in no particular order.
    pub items: Vec<NewsItem>,
    /// Items dropped during listing parse or window filtering.
    pub skipped: Vec<Skipped>,
    /// Number of items whose content fell back to the headline.
    pub degraded: usize,
    /// Whether the listing was read through the link-pattern fallback.
    pub used_fallback_selector: bool,
}

impl RunReport {
    /// Items that mention at least one configured ticker.
    pub fn matched(&self) -> impl Iterator<Item = &NewsItem> {
        self.items.iter().filter(|item| !item.symbols.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(symbols: &[&str]) -> NewsItem {
        NewsItem {
            title: "Test Release".to_string(),
            raw_time: "March 04, 2025".to_string(),
            published_date: NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            date_known: true,
            link: Url::parse("https://www.prnewswire.com/news-releases/test-302001.html").unwrap(),
            content: "Body".to_string(),
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_matched_filters_untagged_items() {
        let report = RunReport {
            items: vec![item(&["TSLA"]), item(&[]), item(&["GM", "F"])],
            ..Default::default()
        };
        assert_eq!(report.matched().count(), 2);
    }

    #[test]
    fn test_news_item_serialization() {
        let json = serde_json::to_string(&item(&["TSLA", "GM"])).unwrap();
        assert!(json.contains("\"published_date\":\"2025-03-04\""));
        assert!(json.contains("\"symbols\":[\"GM\",\"TSLA\"]"));
    }

    #[test]
    fn test_skip_reason_display() {
        let reason = SkipReason::OutsideWindow {
            published_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            cutoff: NaiveDate::from_ymd_opt(2025, 2, 18).unwrap(),
        };
        assert_eq!(
            reason.to_string(),
            "published 2025-02-01, before cutoff 2025-02-18"
        );
        assert_eq!(SkipReason::MissingLink.to_string(), "no link in listing element");
    }
}
