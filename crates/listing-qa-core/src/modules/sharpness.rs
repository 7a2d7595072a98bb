//! Sharpness metric.
//!
//! Variance of the discrete Laplacian over the full frame. In-focus images
//! carry high-frequency detail everywhere and produce a wide spread of
//! second-derivative responses; blur flattens that spread.

use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter::filter3x3;

type GrayF32 = ImageBuffer<Luma<f32>, Vec<f32>>;

/// 4-neighbour Laplacian kernel.
const LAPLACIAN: [f32; 9] = [0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0];

/// Computes the variance of the Laplacian response of an intensity image.
///
/// Returns 0.0 for zero-area images.
#[must_use]
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    if gray.width() == 0 || gray.height() == 0 {
        return 0.0;
    }

    let intensity: GrayF32 = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([f32::from(gray.get_pixel(x, y).0[0])])
    });
    // Border pixels are replicated, not reflected.
    let response: Vec<f32> =
        filter3x3::<Luma<f32>, f32, f32>(&intensity, &LAPLACIAN).into_raw();

    variance(&response)
}

/// Population variance (divides by n).
#[allow(clippy::cast_precision_loss)]
fn variance(values: &[f32]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>()
        / n
}
