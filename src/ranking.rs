//! Grouped top-N rankings over one dimension and one metric.
//!
//! Groups are keyed by the exact cell text (case-sensitive, untrimmed) and kept
//! in first-encounter order, so the stable sort below leaves equal values in the
//! order the groups first appeared in the input.

use crate::models::{
    Aggregation, Dimension, Metric, NormalizedTable, RankedAggregate, RankedEntry, SortOrder,
};
use indexmap::IndexMap;
use std::cmp::Ordering;

/// Number of groups kept per ranked list unless the caller asks otherwise.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Default)]
struct Acc {
    sum: f64,
    count: usize,
}

/// Rank every group of `dimension` by `metric`, best first, without truncation.
///
/// The caller is expected to check `table.has_dimension(dimension)` first; without
/// the column no row carries a key and the result is simply empty.
pub fn rank_all(table: &NormalizedTable, dimension: Dimension, metric: Metric) -> RankedAggregate {
    let mut groups: IndexMap<&str, Acc> = IndexMap::new();
    for r in &table.rows {
        if let Some(key) = r.key(dimension) {
            let acc = groups.entry(key).or_default();
            acc.sum += metric.value_of(r);
            acc.count += 1;
        }
    }

    let mut entries: Vec<RankedEntry> = groups
        .into_iter()
        .map(|(label, acc)| RankedEntry {
            label: label.to_string(),
            value: match metric.aggregation() {
                Aggregation::Sum => acc.sum,
                Aggregation::Mean => acc.sum / acc.count as f64,
            },
        })
        .collect();

    // `sort_by` is stable: ties keep first-encounter order.
    entries.sort_by(|a, b| compare(a.value, b.value, metric.order()));

    RankedAggregate {
        dimension,
        metric,
        entries,
    }
}

/// Top `n` groups of `dimension` by `metric`.
///
/// Output length is `min(n, distinct groups)`; an empty table gives an empty list.
pub fn top_n(
    table: &NormalizedTable,
    dimension: Dimension,
    metric: Metric,
    n: usize,
) -> RankedAggregate {
    let mut ranked = rank_all(table, dimension, metric);
    ranked.entries.truncate(n);
    ranked
}

/// [`top_n`] with the default list length of ten.
pub fn top_10(table: &NormalizedTable, dimension: Dimension, metric: Metric) -> RankedAggregate {
    top_n(table, dimension, metric, DEFAULT_TOP_N)
}

fn compare(a: f64, b: f64, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Descending => b.total_cmp(&a),
        SortOrder::Ascending => a.total_cmp(&b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn row(query: &str, clicks: u64, position: f64) -> Record {
        Record {
            query: Some(query.into()),
            page: None,
            clicks,
            impressions: clicks * 10,
            ctr: 10.0,
            position,
        }
    }

    fn table(rows: Vec<Record>) -> NormalizedTable {
        NormalizedTable {
            columns: ["query", "clicks", "impressions", "ctr", "position"]
                .map(String::from)
                .to_vec(),
            rows,
        }
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let t = table(vec![row("z", 5, 2.0), row("a", 5, 2.0), row("m", 7, 1.0)]);
        let r = top_n(&t, Dimension::Query, Metric::Clicks, 10);
        assert_eq!(r.labels().collect::<Vec<_>>(), ["m", "z", "a"]);
        let r = top_n(&t, Dimension::Query, Metric::Position, 10);
        assert_eq!(r.labels().collect::<Vec<_>>(), ["m", "z", "a"]);
    }

    #[test]
    fn keys_are_case_sensitive_and_untrimmed() {
        let t = table(vec![row("Rust", 1, 1.0), row("rust", 1, 1.0), row("rust ", 1, 1.0)]);
        assert_eq!(top_10(&t, Dimension::Query, Metric::Clicks).len(), 3);
    }

    #[test]
    fn truncates_to_n() {
        let rows = (0..25).map(|i| row(&format!("q{i}"), i, 1.0)).collect();
        let t = table(rows);
        let r = top_10(&t, Dimension::Query, Metric::Clicks);
        assert_eq!(r.len(), 10);
        assert_eq!(r.entries[0].label, "q24");
        assert_eq!(top_n(&t, Dimension::Query, Metric::Clicks, 0).len(), 0);
    }

    #[test]
    fn absent_dimension_yields_empty_list() {
        let t = table(vec![row("a", 1, 1.0)]);
        assert!(top_10(&t, Dimension::Page, Metric::Clicks).is_empty());
    }
}
