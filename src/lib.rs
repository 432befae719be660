//! gsc_report
//!
//! A small Rust library for summarizing Google Search Console performance exports.
//! Pairs with the `gscr` CLI.
//!
//! ### Features
//! - Load a CSV export; column names are case-insensitive and `ctr` may carry a `%` suffix
//! - Overall totals and averages (clicks, impressions, CTR, position)
//! - Top-N queries and pages by clicks, impressions, CTR and position
//! - Render as terminal tables or JSON, export as CSV, draw SVG/PNG bar charts
//!
//! ### Example
//! ```no_run
//! use gsc_report::{ReportConfig, generate_report};
//! use gsc_report::render::{ReportRenderer, TextRenderer};
//!
//! let report = generate_report("gsc_export.csv", &ReportConfig::default())?;
//! TextRenderer::default().render(&report, &mut std::io::stdout())?;
//! gsc_report::viz::plot_report(&report, "charts", &Default::default())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod ranking;
pub mod render;
pub mod report;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::PipelineError;
pub use loader::{CtrScale, LoadOptions, RawTable, load, load_with};
pub use models::{
    Dimension, Metric, NormalizedTable, OverallMetrics, RankedAggregate, RankedEntry, Record,
};
pub use ranking::{DEFAULT_TOP_N, top_n};
pub use report::{Report, ReportConfig, build_report, generate_report};
pub use stats::compute_overall;
