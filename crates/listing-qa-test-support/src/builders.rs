//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, RgbImage};
use listing_qa_core::domain::ImageInfo;

/// Background level of the clean product shots.
const BACKDROP: u8 = 235;

/// Builder for creating synthetic listing photos.
///
/// Provides convenience methods for generating images that trip (or stay
/// clear of) the blur, watermark and duplicate checks.
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a high-contrast checkerboard pattern (very sharp edges).
    ///
    /// Sharp, but edge-dense in every corner, so it also reads as watermarked.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        ImageInfo::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates a clean product shot: sharp detail in the middle third of
    /// the frame, plain backdrop elsewhere.
    ///
    /// Passes every image check at default thresholds.
    #[must_use]
    pub fn product_shot(width: u32, height: u32) -> ImageInfo {
        Self::product_shot_with_pattern(width, height, 0)
    }

    /// Creates a clean product shot whose centre pattern is shifted by
    /// `variant` cells, giving a visually distinct image with the same
    /// quality properties.
    #[must_use]
    pub fn product_shot_with_pattern(width: u32, height: u32, variant: u32) -> ImageInfo {
        let (x0, x1) = (width / 3, width - width / 3);
        let (y0, y1) = (height / 3, height - height / 3);
        let cell = 4 + variant;

        let img = GrayImage::from_fn(width, height, |x, y| {
            let inside = (x0..x1).contains(&x) && (y0..y1).contains(&y);
            if !inside {
                Luma([BACKDROP])
            } else if variant % 2 == 1 && y < (y0 + y1) / 2 {
                // Odd variants darken the top half to change the fingerprint.
                Luma([if (x / cell) % 2 == 0 { 10 } else { 90 }])
            } else if (x / cell + y / cell) % 2 == 0 {
                Luma([20u8])
            } else {
                Luma([200u8])
            }
        });
        ImageInfo::new("synthetic://product_shot", DynamicImage::ImageLuma8(img))
    }

    /// Creates a clean product shot with a dense text-like stamp in the
    /// bottom-right corner.
    #[must_use]
    pub fn watermarked(width: u32, height: u32) -> ImageInfo {
        let base = Self::product_shot(width, height);
        let mut img = base.image.to_luma8();

        let side_w = (width / 5).max(60).min(width);
        let side_h = (height / 5).max(60).min(height);
        for y in height - side_h..height {
            for x in width - side_w..width {
                if (x / 3 + y / 5) % 2 == 0 {
                    img.put_pixel(x, y, Luma([0u8]));
                }
            }
        }
        ImageInfo::new("synthetic://watermarked", DynamicImage::ImageLuma8(img))
    }

    // === Blurry Images ===

    /// Creates a uniform gray image (no edges, simulates severe blur).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a smooth horizontal gradient (soft, simulates defocus).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        ImageInfo::new(
            "synthetic://horizontal_gradient",
            DynamicImage::ImageLuma8(img),
        )
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        ImageInfo::new("synthetic://1x1", DynamicImage::ImageLuma8(img))
    }

    /// Creates an RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| image::Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }
}

/// Convenience functions for common test images.
impl SyntheticImageBuilder {
    /// Returns a standard clean product shot (240x240).
    #[must_use]
    pub fn clean_image() -> ImageInfo {
        Self::product_shot(240, 240)
    }

    /// Returns a standard blurry test image (240x240 uniform gray).
    #[must_use]
    pub fn blurry_image() -> ImageInfo {
        Self::uniform_gray(240, 240, 128)
    }

    /// Returns a standard watermarked test image (240x240).
    #[must_use]
    pub fn watermarked_image() -> ImageInfo {
        Self::watermarked(240, 240)
    }
}
