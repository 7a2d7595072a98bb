//! Heuristic metric extractor.
//!
//! Combines the three per-image signals:
//! - Laplacian variance for sharpness
//! - Corner Canny edge density for watermarks
//! - DCT perceptual hash for duplicate detection

use tracing::debug;

use crate::domain::{ImageInfo, ImageMetrics, MetricExtractor};
use crate::modules::{corner_edge_density, laplacian_variance, perceptual_hash, WatermarkConfig};

/// Explainable, non-learned metric extractor.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor {
    watermark: WatermarkConfig,
}

impl HeuristicExtractor {
    /// Creates an extractor with the given watermark edge settings.
    #[must_use]
    pub const fn new(watermark: WatermarkConfig) -> Self {
        Self { watermark }
    }
}

impl MetricExtractor for HeuristicExtractor {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn extract(&self, image: &ImageInfo) -> ImageMetrics {
        let luma = image.to_luma8();

        let metrics = ImageMetrics {
            sharpness: laplacian_variance(&luma),
            watermark_density: corner_edge_density(&luma, &self.watermark),
            fingerprint: perceptual_hash(&luma),
        };

        debug!(
            path = %image.path,
            sharpness = metrics.sharpness,
            watermark_density = metrics.watermark_density,
            fingerprint = %metrics.fingerprint,
            "Extracted image metrics"
        );

        metrics
    }
}
