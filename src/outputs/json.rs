//! JSON dump of a full run.
//!
//! Unlike the CSV dataset, the JSON file keeps everything in the
//! [`RunReport`]: the date-known flag, skip reasons, and degradation count.
//!
//! ```text
//! json_output_dir/
//! └── 2025-03-18.json
//! ```

use crate::error::NewsError;
use crate::models::RunReport;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `report` to `{json_output_dir}/{run_date}.json` and return the path.
///
/// A second run on the same day overwrites the earlier file.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir.as_ref().display()))]
pub async fn write_report(
    report: &RunReport,
    json_output_dir: impl AsRef<Path>,
    run_date: NaiveDate,
) -> Result<PathBuf, NewsError> {
    let dir = json_output_dir.as_ref();
    let json = serde_json::to_string_pretty(report)?;

    if let Err(e) = fs::create_dir_all(dir).await {
        error!(error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let path = dir.join(format!("{}.json", run_date.format("%Y-%m-%d")));
    fs::write(&path, json).await?;
    info!(path = %path.display(), items = report.items.len(), "Wrote JSON report");

    Ok(path)
}
