use crate::report::Report;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use log::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text that a spreadsheet would evaluate as a formula with a single quote.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save every ranked section as long-format CSV: `dimension,metric,rank,label,value`.
pub fn save_csv<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.serialize(("dimension", "metric", "rank", "label", "value"))?;
    let mut rows = 0usize;
    for s in &report.sections {
        for (i, e) in s.entries.iter().enumerate() {
            wtr.serialize((
                s.dimension.column_name(),
                s.metric.column_name(),
                i + 1,
                sanitize_cell(&e.label),
                e.value,
            ))?;
            rows += 1;
        }
    }
    wtr.flush()?;
    info!("saved {rows} ranked rows to {}", path.display());
    Ok(())
}

/// Save the whole report as a pretty JSON object.
pub fn save_json<P: AsRef<Path>>(report: &Report, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dimension, Metric, OverallMetrics, RankedAggregate, RankedEntry};
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let report = Report {
            row_count: 1,
            dimensions: vec![Dimension::Page],
            overall: OverallMetrics {
                total_clicks: 1,
                total_impressions: 2,
                average_ctr: 50.0,
                average_position: 1.0,
            },
            sections: vec![RankedAggregate {
                dimension: Dimension::Page,
                metric: Metric::Clicks,
                entries: vec![RankedEntry {
                    label: "/a".into(),
                    value: 1.0,
                }],
            }],
        };
        save_csv(&report, &csvp).unwrap();
        save_json(&report, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn formula_starters_are_quoted() {
        assert_eq!(sanitize_cell("=1+1"), "'=1+1");
        assert_eq!(sanitize_cell("-x"), "'-x");
        assert_eq!(sanitize_cell("plain"), "plain");
    }
}
