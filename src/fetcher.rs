//! Single-attempt HTTP GET with a bounded timeout.

use crate::error::{FetchCause, NewsError};
use std::time::Duration;
use tracing::{debug, instrument};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin wrapper over a shared [`reqwest::Client`].
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NewsError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// GET `url` and return the body text. Non-2xx statuses are errors.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, NewsError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NewsError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::fetch(url, FetchCause::Status(status)));
        }

        let body = response.text().await.map_err(|e| NewsError::fetch(url, e))?;
        debug!(bytes = body.len(), "Fetched document");
        Ok(body)
    }
}
