//! End-to-end assembly: overall metrics plus every ranked section that the input supports.

use crate::error::Result;
use crate::loader::{self, LoadOptions};
use crate::models::{Dimension, Metric, NormalizedTable, OverallMetrics, RankedAggregate};
use crate::ranking::{self, DEFAULT_TOP_N};
use crate::stats;
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs for one report run. The CLI fills this from its flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Entries kept per ranked list.
    pub top_n: usize,
    pub load: LoadOptions,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            load: LoadOptions::default(),
        }
    }
}

/// Everything a renderer needs, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub row_count: usize,
    pub dimensions: Vec<Dimension>,
    pub overall: OverallMetrics,
    /// Query sections first, then page sections; within each: clicks, impressions, ctr, position.
    pub sections: Vec<RankedAggregate>,
}

impl Report {
    pub fn section(&self, dimension: Dimension, metric: Metric) -> Option<&RankedAggregate> {
        self.sections
            .iter()
            .find(|s| s.dimension == dimension && s.metric == metric)
    }
}

/// Build the report for an already normalized table.
///
/// Overall metrics are computed first, so an empty table fails before any ranking runs.
pub fn build_report(table: &NormalizedTable, top_n: usize) -> Result<Report> {
    let overall = stats::compute_overall(table)?;
    let dimensions = table.dimensions();
    let mut sections = Vec::with_capacity(dimensions.len() * Metric::ALL.len());
    for &dimension in &dimensions {
        for metric in Metric::ALL {
            sections.push(ranking::top_n(table, dimension, metric, top_n));
        }
    }
    debug!(
        "built report: {} rows, {} sections",
        table.len(),
        sections.len()
    );
    Ok(Report {
        row_count: table.len(),
        dimensions,
        overall,
        sections,
    })
}

/// Load `path` and build its report.
pub fn generate_report<P: AsRef<Path>>(path: P, config: &ReportConfig) -> Result<Report> {
    let table = loader::load_path(path, &config.load)?;
    build_report(&table, config.top_n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{RawTable, load};

    #[test]
    fn sections_follow_dimension_then_metric_order() {
        let raw = RawTable::from_reader(
            "page,query,clicks,impressions,ctr,position\n/a,x,1,10,10%,1\n".as_bytes(),
        )
        .unwrap();
        let report = build_report(&load(raw).unwrap(), 10).unwrap();
        let order: Vec<_> = report
            .sections
            .iter()
            .map(|s| (s.dimension, s.metric))
            .collect();
        assert_eq!(order.len(), 8);
        assert_eq!(order[0], (Dimension::Query, Metric::Clicks));
        assert_eq!(order[3], (Dimension::Query, Metric::Position));
        assert_eq!(order[4], (Dimension::Page, Metric::Clicks));
        assert!(report.section(Dimension::Page, Metric::Ctr).is_some());
    }

    #[test]
    fn generate_from_file_honours_top_n() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.csv");
        std::fs::write(
            &path,
            "query,clicks,impressions,ctr,position\na,1,10,0.1,1\nb,2,10,0.2,2\nc,3,10,0.3,3\n",
        )
        .unwrap();
        let config = ReportConfig {
            top_n: 2,
            load: LoadOptions {
                ctr_scale: loader::CtrScale::Fraction,
            },
        };
        let report = generate_report(&path, &config).unwrap();
        assert_eq!(report.dimensions, [Dimension::Query]);
        let ctr = report.section(Dimension::Query, Metric::Ctr).unwrap();
        assert_eq!(ctr.len(), 2);
        assert_eq!(ctr.entries[0].label, "c");
        assert!((ctr.entries[0].value - 30.0).abs() < 1e-9);
    }
}
