//! Watermark and overlay heuristic.
//!
//! Watermarks and overlaid text tend to sit in a corner and are edge-dense
//! against a clean product background. The metric is the highest fraction
//! of Canny edge pixels among four corner regions, so a mark in a single
//! corner is enough to register.

use image::{GenericImageView, GrayImage};
use imageproc::edges::canny;

/// Corner regions span `1 / REGION_DIVISOR` of each frame dimension...
pub const REGION_DIVISOR: u32 = 5;
/// ...but never less than this many pixels per side.
pub const MIN_REGION_SIDE: u32 = 60;

/// Configuration for the corner edge-density metric.
#[derive(Debug, Clone)]
pub struct WatermarkConfig {
    /// Lower hysteresis threshold for Canny edge detection.
    pub canny_low: f32,
    /// Upper hysteresis threshold for Canny edge detection.
    pub canny_high: f32,
}

impl Default for WatermarkConfig {
    fn default() -> Self {
        Self {
            canny_low: 100.0,
            canny_high: 200.0,
        }
    }
}

/// A rectangular region of the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Number of pixels covered.
    #[must_use]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Returns the top-left, top-right, bottom-left and bottom-right regions.
///
/// Region sides are clamped to the frame, so on frames smaller than
/// [`MIN_REGION_SIDE`] the regions overlap or cover the whole image.
#[must_use]
pub fn corner_regions(width: u32, height: u32) -> [Region; 4] {
    let bw = (width / REGION_DIVISOR).max(MIN_REGION_SIDE).min(width);
    let bh = (height / REGION_DIVISOR).max(MIN_REGION_SIDE).min(height);
    let right = width - bw;
    let bottom = height - bh;

    [
        Region { x: 0, y: 0, width: bw, height: bh },
        Region { x: right, y: 0, width: bw, height: bh },
        Region { x: 0, y: bottom, width: bw, height: bh },
        Region { x: right, y: bottom, width: bw, height: bh },
    ]
}

/// Computes the maximum corner edge density (0.0 to 1.0).
#[must_use]
pub fn corner_edge_density(gray: &GrayImage, config: &WatermarkConfig) -> f64 {
    if gray.width() == 0 || gray.height() == 0 {
        return 0.0;
    }

    let edges = canny(gray, config.canny_low, config.canny_high);

    corner_regions(gray.width(), gray.height())
        .iter()
        .map(|region| edge_fraction(&edges, region))
        .fold(0.0, f64::max)
}

/// Fraction of non-zero pixels of an edge map inside a region.
#[allow(clippy::cast_precision_loss)]
fn edge_fraction(edges: &GrayImage, region: &Region) -> f64 {
    let area = region.area();
    if area == 0 {
        return 0.0;
    }
    let view = edges.view(region.x, region.y, region.width, region.height);
    let count = view.pixels().filter(|(_, _, p)| p.0[0] > 0).count();
    count as f64 / area as f64
}
