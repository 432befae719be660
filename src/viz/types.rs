//! Public types and constants for the chart module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Output image formats supported by the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Vector output via `plotters-svg` (default).
    #[default]
    Svg,
    /// Raster output via `plotters-bitmap`.
    Png,
}

impl ImageFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }

    /// Infer from a file extension (case-insensitive). Anything but `.svg` renders as PNG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => ImageFormat::Svg,
            _ => ImageFormat::Png,
        }
    }
}

/// Rendering options shared by every chart of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Locale tag for tick labels, e.g. `en` or `de`.
    pub locale: String,
    /// TTF/OTF file to register for text. Falls back to common system locations.
    pub font: Option<PathBuf>,
    /// Used by [`super::plot_report`] to name files; single charts infer it from the path.
    pub format: ImageFormat,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            locale: "en".into(),
            font: None,
            format: ImageFormat::Svg,
        }
    }
}

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;
