//! Article body extraction.
//!
//! Release pages do not share one layout, so extraction runs through an
//! ordered list of [`ExtractionStrategy`]s and keeps the first non-empty
//! result. The default order is:
//!
//! | Strategy | Looks at |
//! |----------|----------|
//! | `div.release-body` | newswire release body |
//! | `div.article-body` | generic article body |
//! | `div.release-content` | older release template |
//! | `article` | any `<article>` element |
//! | full page | all visible text in the document |

use crate::error::NewsError;
use crate::fetcher::Fetcher;
use crate::utils::{NON_VISIBLE, text_excluding, truncate_for_log};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::fmt;
use tracing::{debug, info, instrument, warn};

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

const CONTAINER_SELECTORS: [&str; 4] = [
    "div.release-body",
    "div.article-body",
    "div.release-content",
    "article",
];

/// One way of pulling article text out of a parsed page.
pub trait ExtractionStrategy: fmt::Debug + Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// The extracted text, or `None` when this strategy found nothing usable.
    fn extract(&self, document: &Html) -> Option<String>;
}

/// Text from the first element matching a CSS selector.
///
/// Prefers the container's non-empty `<p>` children joined by newlines and
/// falls back to the container's whole text.
pub struct ContainerStrategy {
    css: String,
    selector: Selector,
}

impl ContainerStrategy {
    pub fn new(css: &str) -> Result<Self, NewsError> {
        let selector = Selector::parse(css)
            .map_err(|e| NewsError::Config(format!("invalid selector {css:?}: {e}")))?;
        Ok(Self {
            css: css.to_string(),
            selector,
        })
    }
}

impl fmt::Debug for ContainerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContainerStrategy")
            .field("css", &self.css)
            .finish()
    }
}

impl ExtractionStrategy for ContainerStrategy {
    fn name(&self) -> &str {
        &self.css
    }

    fn extract(&self, document: &Html) -> Option<String> {
        let container = document.select(&self.selector).next()?;

        let paragraphs = container
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| text_excluding(p, &NON_VISIBLE))
            .filter(|text| !text.is_empty())
            .join("\n");
        if !paragraphs.is_empty() {
            return Some(paragraphs);
        }

        let text = text_excluding(container, &NON_VISIBLE);
        (!text.is_empty()).then_some(text)
    }
}

/// All visible text on the page.
#[derive(Debug, Default)]
pub struct FullPageStrategy;

impl ExtractionStrategy for FullPageStrategy {
    fn name(&self) -> &str {
        "full page"
    }

    fn extract(&self, document: &Html) -> Option<String> {
        let text = text_excluding(document.root_element(), &NON_VISIBLE);
        (!text.is_empty()).then_some(text)
    }
}

/// The default strategy order described in the module docs.
pub fn default_strategies() -> Result<Vec<Box<dyn ExtractionStrategy>>, NewsError> {
    let mut strategies = CONTAINER_SELECTORS
        .iter()
        .map(|css| ContainerStrategy::new(css).map(|s| Box::new(s) as Box<dyn ExtractionStrategy>))
        .collect::<Result<Vec<_>, _>>()?;
    strategies.push(Box::new(FullPageStrategy));
    Ok(strategies)
}

/// Fetches article pages and runs the strategy list over them.
#[derive(Debug)]
pub struct ContentExtractor {
    fetcher: Fetcher,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ContentExtractor {
    /// Extractor with the [`default_strategies`].
    pub fn new(fetcher: Fetcher) -> Result<Self, NewsError> {
        Ok(Self::with_strategies(fetcher, default_strategies()?))
    }

    pub fn with_strategies(fetcher: Fetcher, strategies: Vec<Box<dyn ExtractionStrategy>>) -> Self {
        Self {
            fetcher,
            strategies,
        }
    }

    /// Run the strategies over `html` and return the first hit with the name
    /// of the strategy that produced it.
    pub fn extract_from_html(&self, html: &str) -> Option<(String, &str)> {
        let document = Html::parse_document(html);
        self.strategies
            .iter()
            .find_map(|strategy| strategy.extract(&document).map(|text| (text, strategy.name())))
    }

    /// Fetch `url` and extract its text.
    ///
    /// Never fails: a fetch error or a page with no text yields an empty
    /// string and the caller decides what to substitute.
    #[instrument(level = "info", skip(self))]
    pub async fn extract_content(&self, url: &str) -> String {
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(error = %e, "Article fetch failed");
                return String::new();
            }
        };

        match self.extract_from_html(&html) {
            Some((text, strategy)) => {
                info!(strategy, bytes = text.len(), "Extracted article content");
                debug!(preview = %truncate_for_log(&text, 200), "Article content");
                text
            }
            None => {
                warn!("No extraction strategy produced text");
                String::new()
            }
        }
    }
}
