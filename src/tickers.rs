//! Ticker configuration: which symbols to tag and the keywords that signal them.
//!
//! The table is loaded once at startup, either from the built-in automotive
//! defaults or from a YAML file shaped like:
//!
//! ```yaml
//! tickers:
//!   - symbol: TSLA
//!     aliases: ["TSLA", "Tesla", "NYSE: TSLA", "Nasdaq: TSLA"]
//! ```

use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};

/// A ticker symbol and the alias keywords that count as a mention of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSpec {
    pub symbol: String,
    /// Checked in order; the first hit is enough.
    pub aliases: Vec<String>,
}

impl TickerSpec {
    pub fn new(symbol: &str, aliases: &[&str]) -> Self {
        Self {
            symbol: symbol.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Immutable, ordered set of [`TickerSpec`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerTable {
    tickers: Vec<TickerSpec>,
}

impl TickerTable {
    /// Build a table, rejecting blank symbols, duplicate symbols, and empty
    /// alias lists.
    pub fn new(tickers: Vec<TickerSpec>) -> Result<Self, NewsError> {
        let mut seen = std::collections::HashSet::new();
        for spec in &tickers {
            if spec.symbol.trim().is_empty() {
                return Err(NewsError::Config("ticker symbol must not be empty".into()));
            }
            if !seen.insert(spec.symbol.as_str()) {
                return Err(NewsError::Config(format!(
                    "ticker {} is configured twice",
                    spec.symbol
                )));
            }
            if spec.aliases.iter().all(|a| a.trim().is_empty()) {
                return Err(NewsError::Config(format!(
                    "ticker {} has no aliases",
                    spec.symbol
                )));
            }
        }
        Ok(Self { tickers })
    }

    /// Parse a table from YAML text.
    pub fn from_yaml(yaml: &str) -> Result<Self, NewsError> {
        let raw: TickerTable = serde_yaml::from_str(yaml)?;
        Self::new(raw.tickers)
    }

    /// Read a table from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, NewsError> {
        let yaml = tokio::fs::read_to_string(path.as_ref()).await?;
        let table = Self::from_yaml(&yaml)?;
        info!(count = table.len(), "Loaded ticker table");
        Ok(table)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickerSpec> {
        self.tickers.iter()
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

impl Default for TickerTable {
    /// Automotive defaults: Tesla, General Motors, Ford.
    fn default() -> Self {
        Self {
            tickers: vec![
                TickerSpec::new("TSLA", &["TSLA", "Tesla", "NYSE: TSLA", "Nasdaq: TSLA"]),
                TickerSpec::new("GM", &["GM", "General Motors", "NYSE: GM"]),
                TickerSpec::new("F", &["F", "Ford", "NYSE: F"]),
            ],
        }
    }
}
