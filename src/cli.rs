//! Command-line interface definitions for newswire_tagger.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided via environment variables.

use crate::dates::DEFAULT_WINDOW_DAYS;
use crate::fetcher::DEFAULT_TIMEOUT;
use crate::pipeline::{DEFAULT_BASE_URL, DEFAULT_CONCURRENCY, DEFAULT_LISTING_URL};
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the newswire_tagger application.
///
/// # Examples
///
/// ```sh
/// # Default automotive listing, dataset written to ./parsed_news.csv
/// newswire_tagger
///
/// # Custom ticker table and a JSON report alongside the CSV
/// newswire_tagger -t tickers.yaml -o data/news.csv -j data/json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page to scrape
    #[arg(long, env = "NEWS_LISTING_URL", default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Site root used to resolve relative article links
    #[arg(long, env = "NEWS_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path of the CSV dataset to write
    #[arg(short, long, default_value = "parsed_news.csv")]
    pub output: PathBuf,

    /// Optional directory for a JSON dump of the full run report
    #[arg(short, long)]
    pub json_output_dir: Option<PathBuf>,

    /// Optional YAML ticker table (defaults to TSLA, GM, F)
    #[arg(short, long, env = "NEWS_TICKERS")]
    pub tickers: Option<PathBuf>,

    /// Drop articles published more than this many days ago
    #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
    pub lookback_days: i64,

    /// Maximum number of article pages fetched at once
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["newswire_tagger"]);

        assert_eq!(cli.output, PathBuf::from("parsed_news.csv"));
        assert_eq!(cli.lookback_days, 14);
        assert_eq!(cli.concurrency, 8);
        assert_eq!(cli.timeout_secs, DEFAULT_TIMEOUT.as_secs());
        assert_eq!(cli.timeout_secs, 10);
        assert!(cli.json_output_dir.is_none());
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "newswire_tagger",
            "-o",
            "/tmp/news.csv",
            "-j",
            "/tmp/json",
            "-t",
            "/tmp/tickers.yaml",
        ]);

        assert_eq!(cli.output, PathBuf::from("/tmp/news.csv"));
        assert_eq!(cli.json_output_dir, Some(PathBuf::from("/tmp/json")));
        assert_eq!(cli.tickers, Some(PathBuf::from("/tmp/tickers.yaml")));
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "newswire_tagger",
            "--lookback-days",
            "7",
            "--concurrency",
            "2",
            "--timeout-secs",
            "30",
            "--base-url",
            "https://example.com",
        ]);

        assert_eq!(cli.lookback_days, 7);
        assert_eq!(cli.concurrency, 2);
        assert_eq!(cli.timeout_secs, 30);
        assert_eq!(cli.base_url, "https://example.com");
    }
}
