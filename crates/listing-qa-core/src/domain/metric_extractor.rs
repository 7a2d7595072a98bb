//! Metric extractor trait for per-image quality signals.

use super::{ImageInfo, ImageMetrics};

/// Trait for turning one decoded image into quality signals.
///
/// Implementations hold no state across images, so a submission's images
/// may be measured concurrently.
pub trait MetricExtractor: Send + Sync {
    /// Returns the name of this extractor.
    fn name(&self) -> &'static str;

    /// Measures sharpness, watermark density and fingerprint for an image.
    ///
    /// # Arguments
    ///
    /// * `image` - The decoded image to measure
    ///
    /// # Returns
    ///
    /// The extracted metrics. Zero-area images yield zeroed metrics.
    fn extract(&self, image: &ImageInfo) -> ImageMetrics;
}
