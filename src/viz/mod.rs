//! Visualization: render ranked aggregates as bar charts to **SVG** or **PNG**.
//!
//! - One colour per metric (clicks, impressions, CTR, position)
//! - Locale-aware value ticks (`30,000` vs `30.000`)
//! - Position charts use an inverted value axis so the best (lowest) rank is drawn highest
//! - Long query/page labels are truncated to the width of their bar slot

pub mod text;
pub mod types;
pub mod util;

pub use types::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH, ImageFormat};

use crate::models::{Metric, RankedAggregate};
use crate::report::Report;
use anyhow::{Context, Result, anyhow, bail};
use log::{debug, info, warn};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Fonts tried, in order, when no explicit font is configured.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Path of the font registered as "sans-serif" for this process.
static FONT: OnceLock<PathBuf> = OnceLock::new();

const TICK_FONT_PX: u32 = 14;
const LABEL_FONT_PX: u32 = 12;

/// Register a "sans-serif" font for the `ab_glyph` text path, which doesn't discover OS fonts.
///
/// Uses `explicit` if given, otherwise the first readable entry of a list of common
/// system locations. Registration happens once per process: a later call returns the
/// font already registered, and an `explicit` path that differs from it is logged and ignored.
pub fn ensure_font(explicit: Option<&Path>) -> Result<&'static Path> {
    if let Some(p) = FONT.get() {
        if let Some(wanted) = explicit.filter(|w| *w != p.as_path()) {
            warn!(
                "chart font already set to {}; ignoring {}",
                p.display(),
                wanted.display()
            );
        }
        return Ok(p.as_path());
    }
    let candidates: Vec<PathBuf> = match explicit {
        Some(p) => vec![p.to_path_buf()],
        None => FONT_CANDIDATES.iter().map(PathBuf::from).collect(),
    };
    for path in candidates {
        let Ok(bytes) = std::fs::read(&path) else {
            continue;
        };
        if !is_usable_font(&bytes) {
            debug!("{} is not a usable font", path.display());
            continue;
        }
        // plotters keeps a reference for the rest of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            bytes,
        ) {
            Ok(()) => {
                debug!("registered chart font {}", path.display());
                return Ok(FONT.get_or_init(|| path).as_path());
            }
            Err(_) => debug!("{} is not a usable font", path.display()),
        }
    }
    match explicit {
        Some(p) => bail!("cannot load font {}", p.display()),
        None => bail!("no usable system font found for charts; pass one with --font"),
    }
}

/// Whether `bytes` parse as a TrueType/OpenType font.
fn is_usable_font(bytes: &[u8]) -> bool {
    ab_glyph::FontRef::try_from_slice(bytes).is_ok()
}

/// Draw one ranked list as a bar chart. The format follows the file extension (`.svg` or PNG).
pub fn plot_ranked<P: AsRef<Path>>(
    ranked: &RankedAggregate,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    if ranked.is_empty() {
        return Err(anyhow!("no data to plot for {}", ranked.title()));
    }
    ensure_font(opts.font.as_deref())?;
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (opts.width, opts.height);

    match ImageFormat::from_path(out_path) {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_bar_chart(root, ranked, &opts.locale)?;
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
            draw_bar_chart(root, ranked, &opts.locale)?;
        }
    }
    info!("wrote {} to {}", ranked.title(), out_path.display());
    Ok(())
}

/// Write one chart per non-empty section into `dir` as `{dimension}_{metric}.{ext}`.
pub fn plot_report<P: AsRef<Path>>(
    report: &Report,
    dir: P,
    opts: &ChartOptions,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating chart directory {}", dir.display()))?;
    let mut written = Vec::new();
    for section in report.sections.iter().filter(|s| !s.is_empty()) {
        let path = dir.join(format!(
            "{}_{}.{}",
            section.dimension,
            section.metric,
            opts.format.extension()
        ));
        plot_ranked(section, &path, opts)
            .with_context(|| format!("plotting {}", section.title()))?;
        written.push(path);
    }
    Ok(written)
}

fn axis_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Ctr => "CTR (%)",
        other => other.label(),
    }
}

/// Helper that draws to any Plotters backend.
fn draw_bar_chart<DB>(
    root: DrawingArea<DB, Shift>,
    ranked: &RankedAggregate,
    locale: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let metric = ranked.metric;
    let values: Vec<f64> = ranked.values().collect();
    let n = values.len();
    let (y_start, y_end) = util::value_axis_range(&values, metric.order());

    let tick_samples: Vec<String> = [y_start, y_end, (y_start + y_end) / 2.0]
        .iter()
        .map(|v| util::format_metric_value(metric, *v, locale))
        .collect();
    let left_px = util::compute_left_label_area_px(&tick_samples, TICK_FONT_PX);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(format!("Graph of {}", ranked.title()), ("sans-serif", 24))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 64)
        .build_cartesian_2d(0f64..n as f64, y_start..y_end)
        .map_err(|e| anyhow!("{:?}", e))?;

    let y_label_fmt = |v: &f64| util::format_metric_value(metric, *v, locale);
    // Category labels are drawn per bar below; suppress numeric x ticks.
    let x_label_fmt = |_: &f64| String::new();

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(0)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .x_desc(ranked.dimension.label())
        .y_desc(axis_title(metric))
        .label_style(("sans-serif", TICK_FONT_PX))
        .axis_desc_style(("sans-serif", 16))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = util::metric_color(metric);
    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let x0 = i as f64 + 0.15;
            let x1 = i as f64 + 0.85;
            Rectangle::new([(x0, 0.0), (x1, *v)], color.filled())
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    // Category labels, centred under each bar along the bottom edge of the plot.
    let slot_px = (chart.plotting_area().dim_in_pixel().0 / n.max(1) as u32).max(1);
    let label_style = ("sans-serif", LABEL_FONT_PX)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, label) in ranked.labels().enumerate() {
        let (px, py) = chart.backend_coord(&(i as f64 + 0.5, y_start));
        let text = text::truncate_to_width(label, LABEL_FONT_PX, slot_px.saturating_sub(4));
        root.draw(&Text::new(text, (px, py + 6), label_style.clone()))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
