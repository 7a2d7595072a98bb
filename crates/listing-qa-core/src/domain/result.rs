//! Scoring result types.

use image::GenericImageView;
use serde::{Deserialize, Serialize};

use super::{FingerprintHistory, IssueCode, QualityIssue};

/// Outcome of scoring one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Category as submitted (not the fallback it resolved to).
    pub category: String,
    /// Required attribute keys that were checked.
    pub required_attrs: Vec<String>,
    /// Required keys that were absent or empty.
    pub missing_attrs: Vec<String>,
    /// Raised issues, in evaluation order.
    pub issues: Vec<QualityIssue>,
    /// Final score, clamped to 0..=100.
    pub quality_score: u8,
    /// Whether the score meets the gate threshold.
    pub gate_pass: bool,
    /// Threshold the score was compared against.
    pub gate_threshold: i32,
}

impl ScoringResult {
    /// Returns true if an issue with the given code was raised.
    #[must_use]
    pub fn has_issue(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }

    /// Sum of all issue weights before clamping.
    #[must_use]
    pub fn total_penalty(&self) -> u32 {
        self.issues
            .iter()
            .fold(0u32, |acc, issue| acc.saturating_add(issue.weight))
    }
}

/// Report emitted to callers: the result plus the updated history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// The scoring result.
    #[serde(flatten)]
    pub result: ScoringResult,
    /// Fingerprint history after this submission, to pass to the next one.
    pub known_hashes: FingerprintHistory,
    /// Paths of the images that were scored, in submission order.
    pub images: Vec<String>,
    /// Timestamp of scoring (RFC 3339).
    pub scored_at: String,
}

/// Signals extracted from a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageMetrics {
    /// Variance of the Laplacian response.
    pub sharpness: f64,
    /// Highest corner edge-pixel fraction (0.0 to 1.0).
    pub watermark_density: f64,
    /// Perceptual hash as lowercase hex.
    pub fingerprint: String,
}

/// A decoded image handed to the scoring core.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Where the image came from (file path or synthetic label).
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: image::DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: image::DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }

    /// Single-channel intensity view of the image.
    #[must_use]
    pub fn to_luma8(&self) -> image::GrayImage {
        self.image.to_luma8()
    }

    /// Returns true if the image has no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
