//! The ingestion-and-tagging pipeline.
//!
//! listing fetch → listing parse → date resolution and window filter →
//! concurrent content extraction → ticker matching → [`RunReport`].
//!
//! Only the listing fetch and parse can fail the run. Everything after that
//! degrades per item.

use crate::dates::{self, ResolvedDate};
use crate::error::NewsError;
use crate::fetcher::Fetcher;
use crate::matcher::SymbolMatcher;
use crate::models::{Candidate, NewsItem, RunReport, SkipReason, Skipped};
use crate::scrapers::article::ContentExtractor;
use crate::scrapers::listing::parse_listing;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default newswire site root used to resolve relative listing links.
pub const DEFAULT_BASE_URL: &str = "https://www.prnewswire.com";

/// Default listing page: automotive & transportation releases.
pub const DEFAULT_LISTING_URL: &str =
    "https://www.prnewswire.com/news-releases/automotive-transportation-latest-news/automotive-list/";

/// Longest accepted lookback window, roughly a century.
pub const MAX_WINDOW_DAYS: i64 = 36_500;

/// Upper bound on concurrent article fetches when none is configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub listing_url: Url,
    pub base_url: Url,
    pub window_days: i64,
    /// Maximum article fetches in flight.
    pub concurrency: usize,
}

#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Fetcher,
    extractor: ContentExtractor,
    matcher: SymbolMatcher,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        fetcher: Fetcher,
        matcher: SymbolMatcher,
    ) -> Result<Self, NewsError> {
        if config.concurrency == 0 {
            return Err(NewsError::Config("concurrency must be at least 1".into()));
        }
        if config.window_days < 0 {
            return Err(NewsError::Config("lookback window must not be negative".into()));
        }
        if config.window_days > MAX_WINDOW_DAYS {
            return Err(NewsError::Config(format!(
                "lookback window of {} days exceeds the {MAX_WINDOW_DAYS}-day limit",
                config.window_days
            )));
        }
        let extractor = ContentExtractor::new(fetcher.clone())?;
        Ok(Self {
            config,
            fetcher,
            extractor,
            matcher,
        })
    }

    /// Run the pipeline with `now` as the reference date for the lookback
    /// window and for undated items.
    #[instrument(level = "info", skip(self), fields(listing = %self.config.listing_url))]
    pub async fn run(&self, now: NaiveDate) -> Result<RunReport, NewsError> {
        let html = self.fetcher.fetch(self.config.listing_url.as_str()).await?;
        let listing = parse_listing(&html, &self.config.base_url)?;

        let cutoff = dates::cutoff(now, self.config.window_days).ok_or_else(|| {
            NewsError::Config(format!(
                "lookback window of {} days reaches before the earliest date",
                self.config.window_days
            ))
        })?;
        let (in_window, skipped) = listing.candidates.into_iter().fold(
            (Vec::new(), listing.skipped),
            |(mut keep, mut skipped), candidate| {
                let resolved = dates::resolve_date(&candidate.raw_time, now);
                if dates::is_within_window(resolved.date, now, self.config.window_days) {
                    keep.push((candidate, resolved));
                } else {
                    debug!(link = %candidate.link, date = %resolved.date, %cutoff, "Outside lookback window");
                    skipped.push(Skipped {
                        subject: candidate.link.to_string(),
                        reason: SkipReason::OutsideWindow {
                            published_date: resolved.date,
                            cutoff,
                        },
                    });
                }
                (keep, skipped)
            },
        );
        info!(
            in_window = in_window.len(),
            skipped = skipped.len(),
            %cutoff,
            "Filtered candidates by date"
        );

        let built: Vec<(NewsItem, bool)> = stream::iter(in_window)
            .map(|(candidate, resolved)| self.build_item(candidate, resolved))
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        let degraded = built.iter().filter(|(_, degraded)| *degraded).count();
        let items: Vec<NewsItem> = built.into_iter().map(|(item, _)| item).collect();

        info!(
            items = items.len(),
            degraded,
            skipped = skipped.len(),
            "Pipeline run complete"
        );
        Ok(RunReport {
            items,
            skipped,
            degraded,
            used_fallback_selector: listing.used_fallback,
        })
    }

    /// Extract, tag, and assemble one item. The flag is `true` when the
    /// content fell back to the headline.
    async fn build_item(&self, candidate: Candidate, resolved: ResolvedDate) -> (NewsItem, bool) {
        let content = self.extractor.extract_content(candidate.link.as_str()).await;
        let degraded = content.is_empty();
        let content = if degraded {
            warn!(link = %candidate.link, "No article content; using headline");
            candidate.headline.clone()
        } else {
            content
        };

        let symbols = self.matcher.find_symbols(&content);
        debug!(link = %candidate.link, ?symbols, "Tagged article");

        let item = NewsItem {
            title: candidate.headline,
            raw_time: candidate.raw_time,
            published_date: resolved.date,
            date_known: resolved.known,
            link: candidate.link,
            content,
            symbols,
        };
        (item, degraded)
    }
}
