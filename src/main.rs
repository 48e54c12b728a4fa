//! # newswire_tagger
//!
//! Scrapes recent press releases from a newswire listing page, extracts the
//! text of each release, and tags it with the stock tickers it mentions.
//!
//! ## Usage
//!
//! ```sh
//! newswire_tagger -o parsed_news.csv -j ./json -t tickers.yaml
//! ```
//!
//! ## Architecture
//!
//! 1. **Listing**: fetch the listing page and parse candidate releases
//! 2. **Filtering**: resolve each candidate's date and drop anything outside the lookback window
//! 3. **Extraction**: fetch release pages concurrently and pull out their body text
//! 4. **Tagging**: match configured ticker aliases against the text
//! 5. **Output**: write the CSV dataset and, optionally, a JSON run report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod dates;
mod error;
mod fetcher;
mod matcher;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod tickers;
mod utils;

use cli::Cli;
use fetcher::Fetcher;
use matcher::SymbolMatcher;
use models::RunReport;
use outputs::{dataset, json};
use pipeline::{Pipeline, PipelineConfig};
use tickers::TickerTable;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newswire_tagger starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Fail on unwritable outputs before touching the network
    let csv_dir = args
        .output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    if let Err(e) = ensure_writable_dir(csv_dir).await {
        error!(path = %csv_dir.display(), error = %e, "Dataset directory is not writable");
        return Err(e);
    }
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir.display(), error = %e, "JSON output directory is not writable");
            return Err(e);
        }
    }

    // ---- Configuration ----
    let table = match &args.tickers {
        Some(path) => TickerTable::load(path).await?,
        None => TickerTable::default(),
    };
    if table.is_empty() {
        warn!("Ticker table is empty; no items will be tagged");
    }
    info!(
        tickers = ?table.iter().map(|t| t.symbol.as_str()).collect::<Vec<_>>(),
        "Ticker table ready"
    );

    let config = PipelineConfig {
        listing_url: Url::parse(&args.listing_url)?,
        base_url: Url::parse(&args.base_url)?,
        window_days: args.lookback_days,
        concurrency: args.concurrency,
    };
    let fetcher = Fetcher::new(Duration::from_secs(args.timeout_secs))?;
    let pipeline = Pipeline::new(config, fetcher, SymbolMatcher::new(&table)?)?;

    // ---- Run ----
    let today = Local::now().date_naive();
    let report = match pipeline.run(today).await {
        Ok(report) => report,
        Err(e) => {
            error!(error = %e, items = 0, "Run failed; no news items parsed");
            return Err(e.into());
        }
    };
    log_summary(&report);

    // ---- Output ----
    dataset::write_dataset(&report.items, &args.output).await?;
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_report(&report, dir, today).await {
            error!(error = %e, "Failed to write JSON report");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        items = report.items.len(),
        "Execution complete"
    );

    Ok(())
}

fn log_summary(report: &RunReport) {
    for skipped in &report.skipped {
        info!(subject = %skipped.subject, reason = %skipped.reason, "Skipped item");
    }
    if report.degraded > 0 {
        warn!(count = report.degraded, "Items fell back to headline content");
    }

    let matched: Vec<_> = report.matched().collect();
    if matched.is_empty() {
        info!("No news items mentioned the configured tickers");
    }
    for item in &matched {
        info!(
            date = %item.published_date,
            date_known = item.date_known,
            title = %item.title,
            symbols = ?item.symbols,
            "Ticker mention"
        );
    }

    info!(
        items = report.items.len(),
        matched = matched.len(),
        skipped = report.skipped.len(),
        degraded = report.degraded,
        used_fallback_selector = report.used_fallback_selector,
        "Run summary"
    );
}
