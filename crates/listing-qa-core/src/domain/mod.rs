//! Core domain types for listing quality scoring.

mod attributes;
mod history;
mod issue;
mod metric_extractor;
mod result;

pub use attributes::{is_present, missing_keys, AttributeMap};
pub use history::FingerprintHistory;
pub use issue::{
    missing_attribute_penalty, IssueCode, QualityIssue, BLUR_WEIGHT, DUPLICATE_WEIGHT,
    MISSING_ATTRIBUTE_CAP, MISSING_ATTRIBUTE_WEIGHT, WATERMARK_WEIGHT,
};
pub use metric_extractor::MetricExtractor;
pub use result::{ImageInfo, ImageMetrics, ScoreReport, ScoringResult};
