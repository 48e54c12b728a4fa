//! Error types for the ingestion pipeline.
//!
//! Listing-level failures ([`NewsError::Fetch`] on the listing URL and
//! [`NewsError::Parse`]) end the run. Per-article failures never leave the
//! pipeline: they are logged and the article is degraded or skipped.

use thiserror::Error;

/// Errors surfaced by the pipeline, the output writers, and configuration loading.
#[derive(Debug, Error)]
pub enum NewsError {
    /// A GET request failed at the transport layer or returned a non-2xx status.
    #[error("fetch failed for {url}: {cause}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// What went wrong.
        #[source]
        cause: FetchCause,
    },

    /// The listing page yielded no elements from either the card selector or
    /// the link-pattern fallback.
    #[error("listing parse failed: {0}")]
    Parse(String),

    /// A configured URL could not be parsed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The ticker table or CLI settings are unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Underlying cause of a [`NewsError::Fetch`].
#[derive(Debug, Error)]
pub enum FetchCause {
    /// Network, DNS, TLS, timeout, or body decoding failure.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status code.
    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),
}

impl NewsError {
    pub(crate) fn fetch(url: &str, cause: impl Into<FetchCause>) -> Self {
        NewsError::Fetch {
            url: url.to_string(),
            cause: cause.into(),
        }
    }
}

/// A raw date string matched none of the accepted listing formats.
///
/// Only used inside the date filter; callers see a defaulted date instead.
#[derive(Debug, Error)]
#[error("unrecognised date text {raw:?}")]
pub struct DateParseError {
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_carries_url_and_status() {
        let err = NewsError::fetch(
            "https://example.com/news",
            FetchCause::Status(reqwest::StatusCode::NOT_FOUND),
        );
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/news"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = NewsError::Parse("no cards and no release links".to_string());
        assert_eq!(
            err.to_string(),
            "listing parse failed: no cards and no release links"
        );
    }

    #[test]
    fn test_date_parse_error_display() {
        let err = DateParseError {
            raw: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), "unrecognised date text \"yesterday\"");
    }
}
