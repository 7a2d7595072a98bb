//! Quality issues raised while scoring a listing submission.

use serde::{Deserialize, Serialize};

/// Penalty for a blurry photo set.
pub const BLUR_WEIGHT: u32 = 30;
/// Penalty for a watermark or text overlay in any photo.
pub const WATERMARK_WEIGHT: u32 = 20;
/// Penalty for a photo already seen in this or an earlier submission.
pub const DUPLICATE_WEIGHT: u32 = 25;
/// Penalty per missing required attribute.
pub const MISSING_ATTRIBUTE_WEIGHT: u32 = 10;
/// Cap on the total missing-attribute penalty.
pub const MISSING_ATTRIBUTE_CAP: u32 = 40;

/// A weighted penalty with a user-facing explanation and remediation tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityIssue {
    /// Machine-readable issue code.
    pub code: IssueCode,
    /// Human-readable description of the problem.
    pub message: String,
    /// Suggested fix.
    pub tip: String,
    /// Points subtracted from the score.
    pub weight: u32,
}

/// The kind of quality issue.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// One or more required attributes are absent or empty.
    AttrMissing,
    /// At least one image is below the sharpness threshold.
    ImgBlur,
    /// At least one image has an edge-dense corner.
    ImgWatermark,
    /// At least one image fingerprint was seen before.
    ImgDuplicate,
}

impl IssueCode {
    /// Returns the wire representation of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AttrMissing => "ATTR_MISSING",
            Self::ImgBlur => "IMG_BLUR",
            Self::ImgWatermark => "IMG_WATERMARK",
            Self::ImgDuplicate => "IMG_DUPLICATE",
        }
    }
}

impl std::fmt::Display for IssueCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear penalty for `count` missing attributes, capped.
#[must_use]
pub fn missing_attribute_penalty(count: usize) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(MISSING_ATTRIBUTE_WEIGHT)
        .min(MISSING_ATTRIBUTE_CAP)
}

impl QualityIssue {
    /// Issue for required attributes that are absent or empty.
    #[must_use]
    pub fn missing_attributes(missing: &[String]) -> Self {
        Self {
            code: IssueCode::AttrMissing,
            message: format!("Missing required attributes: {}", missing.join(", ")),
            tip: "Fill all mandatory fields; use Listing Copilot to autocomplete.".to_string(),
            weight: missing_attribute_penalty(missing.len()),
        }
    }

    /// Issue for a photo set containing at least one blurry image.
    #[must_use]
    pub fn blur() -> Self {
        Self {
            code: IssueCode::ImgBlur,
            message: "One or more images appear blurry (low sharpness).".to_string(),
            tip: "Upload a sharper image; avoid motion blur; use good lighting.".to_string(),
            weight: BLUR_WEIGHT,
        }
    }

    /// Issue for a photo set with a likely watermark or overlay.
    #[must_use]
    pub fn watermark() -> Self {
        Self {
            code: IssueCode::ImgWatermark,
            message: "Possible watermark/text overlay detected in image corners.".to_string(),
            tip: "Remove watermarks/text overlays; upload a clean product image.".to_string(),
            weight: WATERMARK_WEIGHT,
        }
    }

    /// Issue for a photo set reusing an already-seen image.
    #[must_use]
    pub fn duplicate() -> Self {
        Self {
            code: IssueCode::ImgDuplicate,
            message: "Duplicate image detected (perceptual hash match).".to_string(),
            tip: "Provide distinct angles or close-ups; avoid reusing the same image.".to_string(),
            weight: DUPLICATE_WEIGHT,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_penalty_scale() {
        assert_eq!(missing_attribute_penalty(0), 0);
        assert_eq!(missing_attribute_penalty(1), 10);
        assert_eq!(missing_attribute_penalty(3), 30);
        assert_eq!(missing_attribute_penalty(4), 40);
        assert_eq!(missing_attribute_penalty(5), 40);
        assert_eq!(missing_attribute_penalty(usize::MAX), 40);
    }

    #[test]
    fn test_missing_message_lists_keys() {
        let issue = QualityIssue::missing_attributes(&["brand".into(), "size".into()]);
        assert_eq!(issue.code, IssueCode::AttrMissing);
        assert_eq!(issue.message, "Missing required attributes: brand, size");
        assert_eq!(issue.weight, 20);
    }

    #[test]
    fn test_image_issue_weights() {
        assert_eq!(QualityIssue::blur().weight, 30);
        assert_eq!(QualityIssue::watermark().weight, 20);
        assert_eq!(QualityIssue::duplicate().weight, 25);
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&QualityIssue::duplicate()).unwrap();
        assert!(json.contains(r#""code":"IMG_DUPLICATE""#), "got {json}");

        let code: IssueCode = serde_json::from_str(r#""ATTR_MISSING""#).unwrap();
        assert_eq!(code, IssueCode::AttrMissing);
        assert_eq!(IssueCode::ImgWatermark.to_string(), "IMG_WATERMARK");
    }
}
