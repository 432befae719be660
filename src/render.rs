//! Rendering adapters that turn a [`Report`] into something a person or program reads.
//!
//! The pipeline never renders; it hands a `Report` to whichever [`ReportRenderer`]
//! the caller picks. Charts are file-based and live in [`crate::viz`].

use crate::models::{Metric, RankedAggregate};
use crate::report::Report;
use crate::viz::text::{pad_right, truncate_chars};
use crate::viz::util::{format_count, format_decimal, format_metric_value};
use anyhow::Result;
use std::io::Write;

/// Something that can write a report to a byte sink.
pub trait ReportRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()>;

    /// Convenience: render into a `String`.
    fn render_to_string(&self, report: &Report) -> Result<String> {
        let mut buf = Vec::new();
        self.render(report, &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Plain-text tables for the terminal.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    pub locale: String,
    /// Labels longer than this many characters are cut with `…`.
    pub label_width: usize,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            locale: "en".into(),
            label_width: 48,
        }
    }
}

impl TextRenderer {
    pub fn with_locale(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    fn write_section(&self, s: &RankedAggregate, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "{}", s.title())?;
        if s.is_empty() {
            writeln!(out, "  (no data)")?;
            return Ok(());
        }
        let labels: Vec<String> = s
            .labels()
            .map(|l| truncate_chars(l, self.label_width))
            .collect();
        let col = labels
            .iter()
            .map(|l| l.chars().count())
            .chain(std::iter::once(s.dimension.label().len()))
            .max()
            .unwrap_or(0);
        writeln!(
            out,
            "  {:>3}  {}  {:>14}",
            "#",
            pad_right(s.dimension.label(), col),
            value_heading(s.metric)
        )?;
        for (i, (label, value)) in labels.iter().zip(s.values()).enumerate() {
            writeln!(
                out,
                "  {:>3}  {}  {:>14}",
                i + 1,
                pad_right(label, col),
                format_metric_value(s.metric, value, &self.locale)
            )?;
        }
        Ok(())
    }
}

fn value_heading(metric: Metric) -> &'static str {
    match metric {
        Metric::Ctr => "CTR (%)",
        other => other.label(),
    }
}

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        let m = &report.overall;
        writeln!(out, "Overall Performance Metrics ({} rows)", report.row_count)?;
        let overall = [
            (
                "Total Clicks",
                format_count(m.total_clicks as f64, &self.locale),
            ),
            (
                "Total Impressions",
                format_count(m.total_impressions as f64, &self.locale),
            ),
            (
                "Average CTR (%)",
                format_decimal(m.average_ctr, 2, &self.locale),
            ),
            (
                "Average Position",
                format_decimal(m.average_position, 2, &self.locale),
            ),
        ];
        for (name, value) in overall {
            writeln!(out, "  {}  {:>14}", pad_right(name, 18), value)?;
        }
        for section in &report.sections {
            writeln!(out)?;
            self.write_section(section, out)?;
        }
        Ok(())
    }
}

/// The report as JSON, via serde.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pub pretty: bool,
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report, out: &mut dyn Write) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut *out, report)?;
        } else {
            serde_json::to_writer(&mut *out, report)?;
        }
        writeln!(out)?;
        Ok(())
    }
}
