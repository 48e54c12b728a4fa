//! Listing page parser.
//!
//! The newswire listing renders each release as a card:
//!
//! ```html
//! <div class="row newsCards">
//!   <div class="card col-view">
//!     <a href="/news-releases/ford-expands-302001.html">
//!       <h3><small>March 04, 2025</small> Ford expands EV line</h3>
//!     </a>
//!   </div>
//! </div>
//! ```
//!
//! When no cards are found (layout change, A/B variant, etc.) every anchor
//! pointing at a `/news-releases/` path is used instead.

use crate::error::NewsError;
use crate::models::{Candidate, SkipReason, Skipped};
use crate::utils::{normalize_text, text_without};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static CARD_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.row.newsCards > div.card.col-view").unwrap());
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static HEADING_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static TIME_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("small").unwrap());
static RELEASE_PATH: Lazy<Regex> = Lazy::new(|| Regex::new("/news-releases/").unwrap());

/// Candidates read from one listing page.
#[derive(Debug, Default)]
pub struct Listing {
    pub candidates: Vec<Candidate>,
    /// Elements that matched a selector but could not become a candidate.
    pub skipped: Vec<Skipped>,
    /// `true` when the card selector found nothing and release links were used.
    pub used_fallback: bool,
}

/// Parse a listing page into candidates.
///
/// Relative links are resolved against `base`. Fails with
/// [`NewsError::Parse`] only when neither the card selector nor the
/// release-link fallback matches anything; a bad element is skipped on its own.
#[instrument(level = "info", skip_all, fields(%base))]
pub fn parse_listing(html: &str, base: &Url) -> Result<Listing, NewsError> {
    let document = Html::parse_document(html);

    let cards: Vec<ElementRef<'_>> = document.select(&CARD_SELECTOR).collect();
    let (elements, used_fallback) = if cards.is_empty() {
        let links: Vec<ElementRef<'_>> = document
            .select(&ANCHOR_SELECTOR)
            .filter(|a| a.value().attr("href").is_some_and(|h| RELEASE_PATH.is_match(h)))
            .collect();
        info!(count = links.len(), "No news cards found; falling back to release links");
        (links, true)
    } else {
        (cards, false)
    };

    if elements.is_empty() {
        return Err(NewsError::Parse(
            "no news cards and no news-release links on listing page".to_string(),
        ));
    }

    let listing = elements.into_iter().enumerate().fold(
        Listing {
            used_fallback,
            ..Default::default()
        },
        |mut acc, (index, element)| {
            match parse_element(element, index, base) {
                Ok(candidate) => {
                    debug!(link = %candidate.link, headline = %candidate.headline, "Listing candidate");
                    acc.candidates.push(candidate);
                }
                Err(skipped) => {
                    warn!(subject = %skipped.subject, reason = %skipped.reason, "Skipping listing element");
                    acc.skipped.push(skipped);
                }
            }
            acc
        },
    );

    info!(
        candidates = listing.candidates.len(),
        skipped = listing.skipped.len(),
        used_fallback,
        "Parsed listing page"
    );
    Ok(listing)
}

fn parse_element(element: ElementRef<'_>, index: usize, base: &Url) -> Result<Candidate, Skipped> {
    let anchor = if element.value().name() == "a" && element.value().attr("href").is_some() {
        Some(element)
    } else {
        element.select(&ANCHOR_SELECTOR).next()
    };

    let href = anchor
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .unwrap_or_default();
    if href.is_empty() {
        return Err(Skipped {
            subject: format!("listing element #{index}"),
            reason: SkipReason::MissingLink,
        });
    }

    let link = resolve_link(base, href).map_err(|error| Skipped {
        subject: href.to_string(),
        reason: SkipReason::UnresolvableLink { error },
    })?;

    let (headline, raw_time) = match element.select(&HEADING_SELECTOR).next() {
        Some(heading) => match heading.select(&TIME_SELECTOR).next() {
            Some(small) => (text_without(heading, small), normalize_text(small.text())),
            None => (normalize_text(heading.text()), String::new()),
        },
        None => (
            anchor.map(|a| normalize_text(a.text())).unwrap_or_default(),
            String::new(),
        ),
    };

    Ok(Candidate {
        link,
        headline,
        raw_time,
    })
}

fn resolve_link(base: &Url, href: &str) -> Result<Url, String> {
    let link = base.join(href).map_err(|e| e.to_string())?;
    match link.scheme() {
        "http" | "https" => Ok(link),
        other => Err(format!("unsupported scheme {other:?}")),
    }
}
