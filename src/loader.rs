//! Reading and normalizing a Search Console performance export.
//!
//! Two steps:
//! - [`RawTable`] holds the upload exactly as read (header + string cells), so
//!   callers can echo it back before anything is interpreted.
//! - [`load`] lower-cases the header, checks the required columns, and turns
//!   every row into a typed [`Record`] with `ctr` in percentage points.

use crate::error::{PipelineError, Result};
use crate::models::{NormalizedTable, Record};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// Columns every export must carry, regardless of which dimensions exist.
pub const REQUIRED_COLUMNS: [&str; 4] = ["clicks", "impressions", "ctr", "position"];

/// Every column the loader reads. Each may appear at most once after lower-casing.
const KNOWN_COLUMNS: [&str; 6] = ["query", "page", "clicks", "impressions", "ctr", "position"];

/// Unparsed table as uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        Self { headers, records }
    }

    /// Read a comma-separated file with a header row.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading {}", path.display());
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read comma-separated data with a header row from any reader.
    ///
    /// Rows may be shorter than the header; their missing cells read as blank.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.iter().map(str::to_string).collect();
        let mut records = Vec::new();
        let mut rec = StringRecord::new();
        while rdr.read_record(&mut rec)? {
            records.push(rec.iter().map(str::to_string).collect());
        }
        Ok(Self { headers, records })
    }
}

/// Scale of `ctr` values that carry no `%` suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtrScale {
    /// Plain numbers are already percentage points (`4.5` = 4.5%).
    #[default]
    Percent,
    /// Plain numbers are fractions (`0.045` = 4.5%) and get multiplied by 100.
    Fraction,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    pub ctr_scale: CtrScale,
}

/// Positions of the known columns in the raw header.
struct ColumnIndex {
    query: Option<usize>,
    page: Option<usize>,
    clicks: usize,
    impressions: usize,
    ctr: usize,
    position: usize,
}

impl ColumnIndex {
    fn resolve(columns: &[String]) -> Result<Self> {
        let find = |name: &str| columns.iter().position(|c| c == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| PipelineError::MissingColumn {
                column: name.to_string(),
            })
        };
        // Check in the fixed order of REQUIRED_COLUMNS so the reported column is deterministic.
        for name in REQUIRED_COLUMNS {
            require(name)?;
        }
        for name in KNOWN_COLUMNS {
            if columns.iter().filter(|c| *c == name).count() > 1 {
                return Err(PipelineError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
        }
        Ok(Self {
            query: find("query"),
            page: find("page"),
            clicks: require("clicks")?,
            impressions: require("impressions")?,
            ctr: require("ctr")?,
            position: require("position")?,
        })
    }
}

/// Normalize with default options.
pub fn load(raw: RawTable) -> Result<NormalizedTable> {
    load_with(raw, &LoadOptions::default())
}

/// Read and normalize a CSV file in one go.
pub fn load_path<P: AsRef<Path>>(path: P, opts: &LoadOptions) -> Result<NormalizedTable> {
    load_with(RawTable::from_path(path)?, opts)
}

/// Normalize a raw table: lower-case the header, validate required columns, parse rows.
pub fn load_with(raw: RawTable, opts: &LoadOptions) -> Result<NormalizedTable> {
    let columns: Vec<String> = raw
        .headers
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let idx = ColumnIndex::resolve(&columns)?;

    let mut rows = Vec::with_capacity(raw.records.len());
    for (i, cells) in raw.records.iter().enumerate() {
        let row = i + 1;
        let cell = |at: usize| cells.get(at).map(String::as_str).unwrap_or("");
        let label = |at: Option<usize>| {
            at.map(cell)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        rows.push(Record {
            query: label(idx.query),
            page: label(idx.page),
            clicks: parse_count(cell(idx.clicks), "clicks", row),
            impressions: parse_count(cell(idx.impressions), "impressions", row),
            ctr: parse_ctr(cell(idx.ctr), row, opts.ctr_scale)?,
            position: parse_real(cell(idx.position), "position", row)?,
        });
    }
    debug!(
        "normalized {} rows, columns: {}",
        rows.len(),
        columns.join(",")
    );
    Ok(NormalizedTable { columns, rows })
}

/// Counts are lenient: blank or unreadable cells contribute 0 to every sum.
fn parse_count(s: &str, column: &str, row: usize) -> u64 {
    let t = s.trim();
    if t.is_empty() {
        return 0;
    }
    if let Ok(n) = t.parse::<u64>() {
        return n;
    }
    match t.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 => v as u64,
        _ => {
            warn!("row {row}: non-numeric {column} value {s:?} counted as 0");
            0
        }
    }
}

fn parse_real(s: &str, column: &str, row: usize) -> Result<f64> {
    match s.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(PipelineError::MalformedInput {
            column: column.to_string(),
            row,
            value: s.to_string(),
        }),
    }
}

fn parse_ctr(s: &str, row: usize, scale: CtrScale) -> Result<f64> {
    let has_percent = s.contains('%');
    let v = parse_real(&s.replace('%', ""), "ctr", row).map_err(|_| {
        PipelineError::MalformedInput {
            column: "ctr".into(),
            row,
            value: s.to_string(),
        }
    })?;
    Ok(match scale {
        CtrScale::Fraction if !has_percent => v * 100.0,
        _ => v,
    })
}
