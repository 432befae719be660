//! Utility functions for visualization: colors, axis ranges, locale-aware number formatting.

use crate::models::{Metric, SortOrder};
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

/// Bar colour per metric: blue clicks, green impressions, red CTR, purple position.
pub fn metric_color(metric: Metric) -> RGBColor {
    match metric {
        Metric::Clicks => RGBColor(68, 114, 196),       // #4472C4
        Metric::Impressions => RGBColor(112, 173, 71),  // #70AD47
        Metric::Ctr => RGBColor(192, 0, 0),             // #C00000
        Metric::Position => RGBColor(112, 48, 160),     // #7030A0
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Whole number with locale thousands separators, e.g. `30,000` / `30.000`.
pub fn format_count(v: f64, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    let n = v.round().max(0.0) as u64;
    n.to_formatted_string(locale)
}

/// Fixed decimals with the locale's decimal separator.
pub fn format_decimal(v: f64, decimals: usize, locale_tag: &str) -> String {
    let (_, dec_sep) = map_locale(locale_tag);
    let s = format!("{:.*}", decimals, v);
    if dec_sep == '.' {
        s
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Format an aggregate value the way tables and tick labels show it.
pub fn format_metric_value(metric: Metric, v: f64, locale_tag: &str) -> String {
    match metric {
        Metric::Clicks | Metric::Impressions => format_count(v, locale_tag),
        Metric::Ctr => format!("{}%", format_decimal(v, 2, locale_tag)),
        Metric::Position => format_decimal(v, 2, locale_tag),
    }
}

/// Value-axis range for a bar chart, returned as `(start, end)` in drawing order.
///
/// Bars grow from zero. For ascending metrics (position) the range is reversed so
/// the axis is inverted and the best, lowest value is drawn as the shortest bar hanging
/// from the top.
pub fn value_axis_range(values: &[f64], order: SortOrder) -> (f64, f64) {
    let max = values.iter().cloned().fold(0.0f64, f64::max);
    let top = if max > 0.0 { max * 1.1 } else { 1.0 };
    match order {
        SortOrder::Descending => (0.0, top),
        SortOrder::Ascending => (top, 0.0),
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
pub fn compute_left_label_area_px(labels: &[String], font_px: u32) -> u32 {
    let max_px = labels
        .iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    // Room for tick marks and the rotated axis title.
    max_px.saturating_add(36).clamp(56, 160)
}
