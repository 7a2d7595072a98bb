//! Listing QA Core - Quality scoring for product listing submissions
//!
//! This crate contains the domain types, per-image metrics (sharpness,
//! corner watermark density, perceptual fingerprint), the category schema
//! table and the aggregator that turns them into a score and a gate decision.

pub mod domain;
pub mod extractor;
pub mod modules;
pub mod ports;
pub mod schema;
pub mod scoring;

pub use domain::{
    AttributeMap, FingerprintHistory, ImageInfo, ImageMetrics, IssueCode, MetricExtractor,
    QualityIssue, ScoreReport, ScoringResult,
};
pub use extractor::HeuristicExtractor;
pub use modules::WatermarkConfig;
pub use ports::{ImageLoadError, ImageSource, ProgressEvent, ProgressSink, ResultOutput};
pub use schema::{required_attributes, DEFAULT_CATEGORY};
pub use scoring::{score, QualityAggregator, ScoringConfig};
