use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping dimension for ranked reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Query,
    Page,
}

impl Dimension {
    /// Report order: queries first, then pages.
    pub const ALL: [Dimension; 2] = [Dimension::Query, Dimension::Page];

    /// Normalized (lower-case) column name in the input table.
    pub const fn column_name(self) -> &'static str {
        match self {
            Dimension::Query => "query",
            Dimension::Page => "page",
        }
    }

    /// Plural heading used by renderers, e.g. "Queries".
    pub const fn title(self) -> &'static str {
        match self {
            Dimension::Query => "Queries",
            Dimension::Page => "Pages",
        }
    }

    /// Singular axis label, e.g. "Query".
    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Query => "Query",
            Dimension::Page => "Page",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// How a metric is folded within one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Sum,
    Mean,
}

/// Ranking direction; the first entry is always the "best" one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Descending,
    Ascending,
}

/// Numeric column a ranked aggregate is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Clicks,
    Impressions,
    Ctr,
    Position,
}

impl Metric {
    /// Report order within one dimension.
    pub const ALL: [Metric; 4] = [
        Metric::Clicks,
        Metric::Impressions,
        Metric::Ctr,
        Metric::Position,
    ];

    pub const fn column_name(self) -> &'static str {
        match self {
            Metric::Clicks => "clicks",
            Metric::Impressions => "impressions",
            Metric::Ctr => "ctr",
            Metric::Position => "position",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Metric::Clicks => "Clicks",
            Metric::Impressions => "Impressions",
            Metric::Ctr => "CTR",
            Metric::Position => "Position",
        }
    }

    /// Counts are summed per group, rates and ranks are averaged.
    pub const fn aggregation(self) -> Aggregation {
        match self {
            Metric::Clicks | Metric::Impressions => Aggregation::Sum,
            Metric::Ctr | Metric::Position => Aggregation::Mean,
        }
    }

    /// Position 1 outranks position 10, so position sorts ascending.
    pub const fn order(self) -> SortOrder {
        match self {
            Metric::Position => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }

    /// Read this metric from a record as `f64`.
    pub fn value_of(self, record: &Record) -> f64 {
        match self {
            Metric::Clicks => record.clicks as f64,
            Metric::Impressions => record.impressions as f64,
            Metric::Ctr => record.ctr,
            Metric::Position => record.position,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// One normalized row of the performance export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub query: Option<String>,
    pub page: Option<String>,
    pub clicks: u64,
    pub impressions: u64,
    /// Percentage points: `4.5` means 4.5%.
    pub ctr: f64,
    pub position: f64,
}

impl Record {
    /// Grouping key for `dimension`, if the row has one.
    pub fn key(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Query => self.query.as_deref(),
            Dimension::Page => self.page.as_deref(),
        }
    }
}

/// Table produced by the loader. Never mutated afterwards; all reports are derived from `&self`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalizedTable {
    /// Lower-cased column names in source order.
    pub columns: Vec<String>,
    pub rows: Vec<Record>,
}

impl NormalizedTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Whether the optional grouping column for `dimension` was present in the input.
    pub fn has_dimension(&self, dimension: Dimension) -> bool {
        self.has_column(dimension.column_name())
    }

    /// Present dimensions in report order.
    pub fn dimensions(&self) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.has_dimension(*d))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Whole-table summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OverallMetrics {
    pub total_clicks: u64,
    pub total_impressions: u64,
    pub average_ctr: f64,
    pub average_position: f64,
}

/// One `(label, value)` pair in a ranked list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    pub label: String,
    pub value: f64,
}

/// Top groups of one dimension by one metric, best first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedAggregate {
    pub dimension: Dimension,
    pub metric: Metric,
    pub entries: Vec<RankedEntry>,
}

impl RankedAggregate {
    /// Heading such as "Top Queries by Clicks".
    pub fn title(&self) -> String {
        format!("Top {} by {}", self.dimension.title(), self.metric.label())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_properties() {
        assert_eq!(Metric::Clicks.aggregation(), Aggregation::Sum);
        assert_eq!(Metric::Impressions.aggregation(), Aggregation::Sum);
        assert_eq!(Metric::Ctr.aggregation(), Aggregation::Mean);
        assert_eq!(Metric::Position.aggregation(), Aggregation::Mean);
        assert_eq!(Metric::Position.order(), SortOrder::Ascending);
        assert_eq!(Metric::Ctr.order(), SortOrder::Descending);
    }

    #[test]
    fn serde_names_are_lowercase() {
        let s = serde_json::to_string(&(Dimension::Page, Metric::Ctr)).unwrap();
        assert_eq!(s, r#"["page","ctr"]"#);
    }
}
