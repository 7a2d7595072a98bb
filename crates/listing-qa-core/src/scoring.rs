//! Quality aggregation: folds attribute completeness and per-image signals
//! into one weighted score and a pass/fail gate.
//!
//! Image penalties are flat per submission. One blurry image raises
//! `IMG_BLUR` once; further blurry images add nothing.

use rayon::prelude::*;
use tracing::{debug, info};

use crate::domain::{
    missing_keys, AttributeMap, FingerprintHistory, ImageInfo, ImageMetrics, MetricExtractor,
    QualityIssue, ScoringResult,
};
use crate::extractor::HeuristicExtractor;
use crate::schema::required_attributes;

/// Thresholds for the scoring gate.
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Images with Laplacian variance below this are blurry.
    pub blur_threshold: f64,
    /// Images with corner edge density at or above this carry a watermark.
    pub watermark_density_threshold: f64,
    /// Minimum score for the gate to pass.
    pub gate_threshold: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            blur_threshold: 120.0,
            watermark_density_threshold: 0.12,
            gate_threshold: 70,
        }
    }
}

/// Per-submission image flags. Each is set once and never stacks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ImageFlags {
    blur: bool,
    watermark: bool,
    duplicate: bool,
}

/// Scores listing submissions against a [`ScoringConfig`].
pub struct QualityAggregator<E = HeuristicExtractor> {
    config: ScoringConfig,
    extractor: E,
}

impl QualityAggregator<HeuristicExtractor> {
    /// Creates an aggregator using the heuristic extractor.
    #[must_use]
    pub fn new(config: ScoringConfig) -> Self {
        Self::with_extractor(config, HeuristicExtractor::default())
    }
}

impl Default for QualityAggregator<HeuristicExtractor> {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}

impl<E: MetricExtractor> QualityAggregator<E> {
    /// Creates an aggregator with a custom extractor.
    #[must_use]
    pub const fn with_extractor(config: ScoringConfig, extractor: E) -> Self {
        Self { config, extractor }
    }

    /// Returns the scoring thresholds.
    #[must_use]
    pub const fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores one submission.
    ///
    /// Images are measured in parallel; the history is then extended with
    /// every fingerprint in submission order, duplicates included. The
    /// extended history is returned alongside the result.
    #[must_use]
    pub fn score(
        &self,
        category: &str,
        attributes: &AttributeMap,
        images: &[ImageInfo],
        history: FingerprintHistory,
    ) -> (ScoringResult, FingerprintHistory) {
        debug!(
            extractor = self.extractor.name(),
            images = images.len(),
            "Measuring submission images"
        );
        let metrics: Vec<ImageMetrics> = images
            .par_iter()
            .map(|image| self.extractor.extract(image))
            .collect();

        self.score_metrics(category, attributes, &metrics, history)
    }

    /// Scores a submission from already-extracted metrics.
    ///
    /// `metrics` must be in submission order for duplicate detection
    /// within the submission to be meaningful.
    #[must_use]
    pub fn score_metrics(
        &self,
        category: &str,
        attributes: &AttributeMap,
        metrics: &[ImageMetrics],
        mut history: FingerprintHistory,
    ) -> (ScoringResult, FingerprintHistory) {
        let required = required_attributes(category);
        let missing = missing_keys(required, attributes);

        let mut issues = Vec::new();
        if !missing.is_empty() {
            issues.push(QualityIssue::missing_attributes(&missing));
        }

        let mut flags = ImageFlags::default();
        for m in metrics {
            if m.sharpness < self.config.blur_threshold {
                flags.blur = true;
            }
            if m.watermark_density >= self.config.watermark_density_threshold {
                flags.watermark = true;
            }
            if history.contains(&m.fingerprint) {
                flags.duplicate = true;
            }
            history.push(m.fingerprint.clone());
        }

        if flags.blur {
            issues.push(QualityIssue::blur());
        }
        if flags.watermark {
            issues.push(QualityIssue::watermark());
        }
        if flags.duplicate {
            issues.push(QualityIssue::duplicate());
        }

        let quality_score = clamp_score(&issues);
        let gate_pass = i32::from(quality_score) >= self.config.gate_threshold;

        info!(
            category,
            score = quality_score,
            gate_pass,
            issues = issues.len(),
            "Scored submission"
        );

        let result = ScoringResult {
            category: category.to_string(),
            required_attrs: required.iter().map(|k| (*k).to_string()).collect(),
            missing_attrs: missing,
            issues,
            quality_score,
            gate_pass,
            gate_threshold: self.config.gate_threshold,
        };

        (result, history)
    }
}

/// `100 - sum(weights)`, clamped to 0..=100.
fn clamp_score(issues: &[QualityIssue]) -> u8 {
    let penalty: i64 = issues.iter().map(|issue| i64::from(issue.weight)).sum();
    u8::try_from((100 - penalty).clamp(0, 100)).unwrap_or(0)
}

/// Scores one submission with the heuristic extractor.
///
/// Convenience entry point taking the thresholds directly; returns the
/// result and the extended fingerprint history.
#[must_use]
pub fn score(
    category: &str,
    attributes: &AttributeMap,
    images: &[ImageInfo],
    known_fingerprints: Vec<String>,
    blur_threshold: f64,
    watermark_density_threshold: f64,
    gate_threshold: i32,
) -> (ScoringResult, FingerprintHistory) {
    let config = ScoringConfig {
        blur_threshold,
        watermark_density_threshold,
        gate_threshold,
    };
    QualityAggregator::new(config).score(
        category,
        attributes,
        images,
        FingerprintHistory::from(known_fingerprints),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::domain::IssueCode;
    use image::{DynamicImage, GrayImage, Luma};
    use serde_json::json;

    /// Extractor that reports fixed metrics keyed by image path.
    struct FixedExtractor(Vec<(&'static str, ImageMetrics)>);

    impl MetricExtractor for FixedExtractor {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract(&self, image: &ImageInfo) -> ImageMetrics {
            self.0
                .iter()
                .find(|(path, _)| *path == image.path)
                .map(|(_, m)| m.clone())
                .unwrap()
        }
    }

    fn metrics(sharpness: f64, watermark_density: f64, fingerprint: &str) -> ImageMetrics {
        ImageMetrics {
            sharpness,
            watermark_density,
            fingerprint: fingerprint.to_string(),
        }
    }

    fn clean(fingerprint: &str) -> ImageMetrics {
        metrics(500.0, 0.01, fingerprint)
    }

    fn image(path: &str) -> ImageInfo {
        ImageInfo::new(path, DynamicImage::new_luma8(4, 4))
    }

    fn full_tshirt() -> AttributeMap {
        let mut attrs = AttributeMap::new();
        attrs.insert("brand".into(), json!("Acme"));
        attrs.insert("size".into(), json!("M"));
        attrs.insert("color".into(), json!("navy"));
        attrs.insert("material".into(), json!("cotton"));
        attrs
    }

    fn aggregator() -> QualityAggregator<HeuristicExtractor> {
        QualityAggregator::default()
    }

    #[test]
    fn test_default_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.blur_threshold, 120.0);
        assert_eq!(config.watermark_density_threshold, 0.12);
        assert_eq!(config.gate_threshold, 70);
    }

    #[test]
    fn test_no_images_full_attributes_is_perfect() {
        let (result, history) =
            aggregator().score("T-Shirt", &full_tshirt(), &[], FingerprintHistory::new());

        assert_eq!(result.quality_score, 100);
        assert!(result.gate_pass);
        assert!(result.issues.is_empty());
        assert!(result.missing_attrs.is_empty());
        assert!(history.is_empty());
    }

    #[test]
    fn test_one_missing_attribute() {
        let mut attrs = full_tshirt();
        attrs.remove("material");

        let (result, _) = aggregator().score_metrics("T-Shirt", &attrs, &[], FingerprintHistory::new());
        assert_eq!(result.missing_attrs, ["material"]);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, IssueCode::AttrMissing);
        assert_eq!(result.issues[0].weight, 10);
        assert_eq!(result.quality_score, 90);
    }

    #[test]
    fn test_missing_penalty_capped() {
        // Unknown category falls back to the 4-key default; all missing.
        let (result, _) = aggregator().score_metrics(
            "Unknown",
            &AttributeMap::new(),
            &[],
            FingerprintHistory::new(),
        );
        assert_eq!(result.required_attrs, ["brand", "size", "color", "material"]);
        assert_eq!(result.missing_attrs.len(), 4);
        assert_eq!(result.issues[0].weight, 40);
        assert_eq!(result.quality_score, 60);
        assert!(!result.gate_pass);
    }

    #[test]
    fn test_known_category_applies_its_keys() {
        let (result, _) = aggregator().score_metrics(
            "Saree",
            &full_tshirt(),
            &[],
            FingerprintHistory::new(),
        );
        assert_eq!(result.category, "Saree");
        assert_eq!(result.missing_attrs, ["fabric", "length"]);
        assert_eq!(result.issues[0].weight, 20);
    }

    #[test]
    fn test_blur_only() {
        let agg = aggregator();
        let (result, _) = agg.score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &[metrics(12.0, 0.01, "a1")],
            FingerprintHistory::new(),
        );

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].code, IssueCode::ImgBlur);
        assert_eq!(result.issues[0].weight, 30);
        assert_eq!(result.quality_score, 70);
        assert!(result.gate_pass, "70 meets the default threshold of 70");
    }

    #[test]
    fn test_watermark_threshold_inclusive() {
        let (result, _) = aggregator().score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &[metrics(500.0, 0.12, "a1")],
            FingerprintHistory::new(),
        );
        assert!(result.has_issue(IssueCode::ImgWatermark));
        assert_eq!(result.quality_score, 80);
    }

    #[test]
    fn test_blur_threshold_exclusive() {
        let (result, _) = aggregator().score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &[metrics(120.0, 0.0, "a1")],
            FingerprintHistory::new(),
        );
        assert!(!result.has_issue(IssueCode::ImgBlur));
    }

    #[test]
    fn test_flags_do_not_stack() {
        let images = [
            metrics(1.0, 0.9, "a1"),
            metrics(2.0, 0.8, "a2"),
            metrics(3.0, 0.7, "a3"),
        ];
        let (result, _) = aggregator().score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &images,
            FingerprintHistory::new(),
        );

        let codes: Vec<_> = result.issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, [IssueCode::ImgBlur, IssueCode::ImgWatermark]);
        assert_eq!(result.quality_score, 50);
    }

    #[test]
    fn test_duplicate_within_submission() {
        let (result, history) = aggregator().score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &[clean("ab12"), clean("ab12")],
            FingerprintHistory::new(),
        );

        assert!(result.has_issue(IssueCode::ImgDuplicate));
        assert_eq!(result.quality_score, 75);
        assert_eq!(history.as_slice(), ["ab12", "ab12"]);
    }

    #[test]
    fn test_duplicate_against_known_history() {
        let known = FingerprintHistory::from(vec!["old1".to_string(), "ab12".to_string()]);
        let (result, history) =
            aggregator().score_metrics("T-Shirt", &full_tshirt(), &[clean("ab12")], known);

        assert!(result.has_issue(IssueCode::ImgDuplicate));
        assert_eq!(history.as_slice(), ["old1", "ab12", "ab12"]);
    }

    #[test]
    fn test_distinct_images_extend_history() {
        let known = FingerprintHistory::from(vec!["old1".to_string()]);
        let (result, history) = aggregator().score_metrics(
            "T-Shirt",
            &full_tshirt(),
            &[clean("n1"), clean("n2")],
            known,
        );

        assert!(result.issues.is_empty());
        assert_eq!(history.as_slice(), ["old1", "n1", "n2"]);
    }

    #[test]
    fn test_history_threads_across_submissions() {
        let agg = aggregator();
        let (first, history) =
            agg.score_metrics("T-Shirt", &full_tshirt(), &[clean("p1")], FingerprintHistory::new());
        assert!(!first.has_issue(IssueCode::ImgDuplicate));

        let (second, history) = agg.score_metrics("T-Shirt", &full_tshirt(), &[clean("p1")], history);
        assert!(second.has_issue(IssueCode::ImgDuplicate));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let images = [metrics(0.0, 1.0, "z"), metrics(0.0, 1.0, "z")];
        let (result, _) = aggregator().score_metrics(
            "Footwear",
            &AttributeMap::new(),
            &images,
            FingerprintHistory::new(),
        );

        // 40 + 30 + 20 + 25 = 115 > 100
        assert_eq!(result.total_penalty(), 115);
        assert_eq!(result.quality_score, 0);
        assert!(!result.gate_pass);
    }

    #[test]
    fn test_issue_order() {
        let images = [metrics(0.0, 1.0, "z"), metrics(0.0, 1.0, "z")];
        let (result, _) = aggregator().score_metrics(
            "T-Shirt",
            &AttributeMap::new(),
            &images,
            FingerprintHistory::new(),
        );
        let codes: Vec<_> = result.issues.iter().map(|i| i.code).collect();
        assert_eq!(
            codes,
            [
                IssueCode::AttrMissing,
                IssueCode::ImgBlur,
                IssueCode::ImgWatermark,
                IssueCode::ImgDuplicate
            ]
        );
    }

    #[test]
    fn test_gate_matches_threshold() {
        for gate_threshold in [-10, 0, 50, 70, 71, 100, 101] {
            let config = ScoringConfig {
                gate_threshold,
                ..Default::default()
            };
            let (result, _) = QualityAggregator::new(config).score_metrics(
                "T-Shirt",
                &full_tshirt(),
                &[metrics(5.0, 0.0, "g")],
                FingerprintHistory::new(),
            );
            assert_eq!(result.gate_threshold, gate_threshold);
            assert_eq!(
                result.gate_pass,
                i32::from(result.quality_score) >= gate_threshold,
                "threshold {gate_threshold}"
            );
        }
    }

    #[test]
    fn test_score_runs_extractor_in_submission_order() {
        let extractor = FixedExtractor(vec![
            ("first.png", clean("f1")),
            ("second.png", metrics(3.0, 0.0, "f2")),
            ("third.png", clean("f1")),
        ]);
        let agg = QualityAggregator::with_extractor(ScoringConfig::default(), extractor);
        let images = [image("first.png"), image("second.png"), image("third.png")];

        let (result, history) =
            agg.score("T-Shirt", &full_tshirt(), &images, FingerprintHistory::new());

        assert_eq!(history.as_slice(), ["f1", "f2", "f1"]);
        assert!(result.has_issue(IssueCode::ImgBlur));
        assert!(result.has_issue(IssueCode::ImgDuplicate));
        assert_eq!(result.quality_score, 45);
    }

    #[test]
    fn test_identical_real_images_flag_duplicate() {
        let img = GrayImage::from_fn(160, 160, |x, y| {
            if (x / 8 + y / 8) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        let a = ImageInfo::new("a.png", DynamicImage::ImageLuma8(img.clone()));
        let b = ImageInfo::new("b.png", DynamicImage::ImageLuma8(img));

        let (result, history) = score(
            "T-Shirt",
            &full_tshirt(),
            &[a, b],
            vec![],
            120.0,
            1.1,
            70,
        );

        assert!(result.has_issue(IssueCode::ImgDuplicate));
        assert_eq!(history.len(), 2);
        assert_eq!(history.as_slice()[0], history.as_slice()[1]);
    }

    #[test]
    fn test_uniform_real_image_is_blurry_only() {
        let img = GrayImage::from_fn(200, 200, |_, _| Luma([128u8]));
        let info = ImageInfo::new("flat.png", DynamicImage::ImageLuma8(img));

        let (result, history) = score("T-Shirt", &full_tshirt(), &[info], vec![], 120.0, 0.12, 70);

        let codes: Vec<_> = result.issues.iter().map(|i| i.code).collect();
        assert_eq!(codes, [IssueCode::ImgBlur]);
        assert_eq!(result.quality_score, 70);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_falsy_attribute_counts_missing() {
        let mut attrs = full_tshirt();
        attrs.insert("size".into(), json!(null));
        attrs.insert("color".into(), json!(false));

        let (result, _) =
            aggregator().score_metrics("T-Shirt", &attrs, &[], FingerprintHistory::new());
        assert_eq!(result.missing_attrs, ["size", "color"]);
        assert_eq!(result.quality_score, 80);
    }
}
