//! Output writers for a finished run.
//!
//! # Submodules
//!
//! - [`dataset`]: the CSV dataset consumed by downstream analysis
//! - [`json`]: optional JSON dump of the whole [`RunReport`](crate::models::RunReport)
//!
//! # Output Structure
//!
//! ```text
//! parsed_news.csv            # --output
//! json_output_dir/
//! └── 2025-03-18.json        # --json-output-dir, one file per run date
//! ```

pub mod dataset;
pub mod json;
