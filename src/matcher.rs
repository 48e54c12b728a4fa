//! Keyword-based ticker tagging.
//!
//! Each alias compiles to a case-insensitive, word-bounded regex so that a
//! short alias such as `F` only matches the standalone word.

use crate::error::NewsError;
use crate::tickers::TickerTable;
use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;
use tracing::trace;

#[derive(Debug)]
struct CompiledTicker {
    symbol: String,
    patterns: Vec<Regex>,
}

/// Finds which configured tickers a piece of text mentions.
#[derive(Debug)]
pub struct SymbolMatcher {
    tickers: Vec<CompiledTicker>,
}

impl SymbolMatcher {
    /// Compile every alias in `table`. Blank aliases are ignored.
    pub fn new(table: &TickerTable) -> Result<Self, NewsError> {
        let tickers = table
            .iter()
            .map(|spec| {
                let patterns = spec
                    .aliases
                    .iter()
                    .map(|alias| alias.trim())
                    .filter(|alias| !alias.is_empty())
                    .map(|alias| {
                        RegexBuilder::new(&format!(r"\b{}\b", regex::escape(alias)))
                            .case_insensitive(true)
                            .build()
                            .map_err(|e| {
                                NewsError::Config(format!("alias {alias:?} for {}: {e}", spec.symbol))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CompiledTicker {
                    symbol: spec.symbol.clone(),
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, NewsError>>()?;
        Ok(Self { tickers })
    }

    /// Tickers mentioned anywhere in `text`.
    pub fn find_symbols(&self, text: &str) -> BTreeSet<String> {
        self.tickers
            .iter()
            .filter(|ticker| {
                // first alias hit is enough
                let hit = ticker.patterns.iter().find(|p| p.is_match(text));
                if let Some(p) = hit {
                    trace!(symbol = %ticker.symbol, pattern = %p, "Ticker matched");
                }
                hit.is_some()
            })
            .map(|ticker| ticker.symbol.clone())
            .collect()
    }
}
