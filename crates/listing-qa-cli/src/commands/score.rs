//! Score command - grade one listing submission.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use listing_qa_adapters::{FsImageSource, Submission};
use listing_qa_core::{
    HeuristicExtractor, ImageInfo, ImageSource, ProgressEvent, ProgressSink, QualityAggregator,
    ResultOutput, ScoreReport, ScoringConfig, WatermarkConfig,
};
use tracing::{debug, info, warn};

use super::ExitCode;
use crate::config::AppConfig;
use crate::output::{JsonOutput, ProgressBar};

/// Parse a non-negative number.
fn parse_non_negative(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{value} must not be negative"))
    }
}

/// Parse an edge density (0.0-1.0).
fn parse_density(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is not in 0.0..=1.0"))
    }
}

/// Arguments for scoring a submission.
#[derive(Args, Clone)]
pub struct ScoreArgs {
    /// Image files or directories making up the submission
    pub images: Vec<PathBuf>,

    /// JSON payload with category, attrs and known_hashes
    #[arg(long, value_name = "FILE")]
    pub payload: Option<PathBuf>,

    /// Listing category (overrides the payload)
    #[arg(long)]
    pub category: Option<String>,

    /// Attribute value, repeatable (overrides the payload)
    #[arg(long = "attr", value_name = "KEY=VALUE")]
    pub attrs: Vec<String>,

    /// Previously seen fingerprint, repeatable (appended after the payload's)
    #[arg(long = "known-hash", value_name = "HASH")]
    pub known_hashes: Vec<String>,

    /// Laplacian variance below which an image is blurry
    #[arg(long, env = "BLUR_THRESHOLD", value_parser = parse_non_negative)]
    pub blur_threshold: Option<f64>,

    /// Corner edge density at or above which an image is watermarked (0.0-1.0)
    #[arg(long, env = "WATERMARK_EDGE_DENSITY", value_parser = parse_density)]
    pub watermark_density: Option<f64>,

    /// Minimum quality score for the gate to pass
    #[arg(long, env = "MIN_QUALITY_SCORE")]
    pub min_score: Option<i32>,

    /// Show progress bar
    #[arg(long)]
    pub progress: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Edge detection settings (populated by `with_config`, not from CLI).
    #[arg(skip)]
    watermark: WatermarkConfig,
}

impl ScoreArgs {
    /// Apply configuration file values, respecting CLI precedence.
    ///
    /// Layering priority (lowest to highest):
    /// 1. Hardcoded defaults (in `ScoringConfig` / `WatermarkConfig`)
    /// 2. Config file values (XDG, then project-local)
    /// 3. Environment variables and CLI arguments (already set on self)
    pub fn with_config(mut args: Self, config: &AppConfig) -> Self {
        args.blur_threshold = args.blur_threshold.or(config.scoring.blur_threshold);
        args.watermark_density = args
            .watermark_density
            .or(config.scoring.watermark_edge_density);
        args.min_score = args.min_score.or(config.scoring.min_quality_score);

        let defaults = WatermarkConfig::default();
        args.watermark = WatermarkConfig {
            canny_low: config.watermark.canny_low.unwrap_or(defaults.canny_low),
            canny_high: config.watermark.canny_high.unwrap_or(defaults.canny_high),
        };

        if !args.pretty {
            args.pretty = config.output.pretty.unwrap_or(false);
        }
        if !args.progress {
            args.progress = config.output.progress.unwrap_or(false);
        }

        args
    }

    /// Thresholds after layering, with hardcoded fallbacks.
    fn scoring_config(&self) -> ScoringConfig {
        let defaults = ScoringConfig::default();
        ScoringConfig {
            blur_threshold: self.blur_threshold.unwrap_or(defaults.blur_threshold),
            watermark_density_threshold: self
                .watermark_density
                .unwrap_or(defaults.watermark_density_threshold),
            gate_threshold: self.min_score.unwrap_or(defaults.gate_threshold),
        }
    }

    /// Builds the submission from the payload file and the CLI overrides.
    fn submission(&self) -> Result<Submission> {
        let mut submission = match &self.payload {
            Some(path) => Submission::load(path)?,
            None => Submission::default(),
        };

        if let Some(category) = &self.category {
            submission.category = Some(category.clone());
        }
        for assignment in &self.attrs {
            submission.set_attr(assignment)?;
        }
        submission.known_hashes.extend(self.known_hashes.iter().cloned());

        Ok(submission)
    }
}

/// Result of running the score command.
#[allow(dead_code)] // Fields exposed for programmatic use
pub struct ScoreOutcome {
    /// The report that was written.
    pub report: ScoreReport,
    /// Exit code.
    pub exit_code: ExitCode,
}

/// Run the score command.
///
/// Expects `args` to have been processed through `with_config()` first
/// to apply configuration file settings.
///
/// The submission is scored whole or not at all: if any image fails to
/// load, an error is returned and no report is written.
pub fn run(args: &ScoreArgs) -> Result<ScoreOutcome> {
    let submission = args.submission()?;
    let category = submission.category_or_default().to_string();
    info!(
        category = %category,
        paths = args.images.len(),
        known_hashes = submission.known_hashes.len(),
        "Running score command"
    );

    let source = FsImageSource::new(args.images.clone());

    let show_progress = !args.quiet && (args.progress || std::io::stderr().is_terminal());
    let progress = ProgressBar::new(
        source.count_hint().map(|t| t as u64),
        args.quiet,
        show_progress,
    );

    let images = load_images(&source, &progress)?;

    let config = args.scoring_config();
    debug!(?config, watermark = ?args.watermark, "Scoring thresholds");
    let aggregator =
        QualityAggregator::with_extractor(config, HeuristicExtractor::new(args.watermark.clone()));

    progress.on_event(ProgressEvent::Scoring {
        images: images.len(),
    });
    let (result, history) =
        aggregator.score(&category, &submission.attrs, &images, submission.history());

    let report = ScoreReport {
        result,
        known_hashes: history,
        images: images.into_iter().map(|image| image.path).collect(),
        scored_at: iso_timestamp(),
    };

    let output = JsonOutput::stdout(args.pretty);
    output.write(&report)?;
    output.flush()?;

    progress.on_event(ProgressEvent::Finished {
        score: report.result.quality_score,
        gate_pass: report.result.gate_pass,
    });

    let exit_code = if report.result.gate_pass {
        ExitCode::Success
    } else {
        ExitCode::GateFailed
    };

    Ok(ScoreOutcome { report, exit_code })
}

/// Decodes every image in the source.
///
/// Every failure is reported as a `Skipped` event; if there was any, the
/// whole submission is rejected.
fn load_images(source: &dyn ImageSource, progress: &dyn ProgressSink) -> Result<Vec<ImageInfo>> {
    let total = source.count_hint();
    let mut images = Vec::new();
    let mut failures = Vec::new();

    for (index, image_result) in source.images().enumerate() {
        match image_result {
            Ok(image) => {
                progress.on_event(ProgressEvent::Loaded {
                    path: image.path.clone(),
                    index,
                    total,
                });
                images.push(image);
            }
            Err(e) => {
                warn!("Cannot load {}: {:#}", e.path, e.cause);
                progress.on_event(ProgressEvent::Skipped {
                    path: e.path.clone(),
                    reason: format!("{:#}", e.cause),
                });
                failures.push(e);
            }
        }
    }

    match failures.len() {
        0 => Ok(images),
        1 => Err(anyhow::Error::new(failures.remove(0)).context("Submission not scored")),
        n => bail!(
            "Submission not scored: {n} images could not be loaded ({})",
            failures
                .iter()
                .map(|e| e.path.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Generate ISO 8601 UTC timestamp (RFC 3339 format).
fn iso_timestamp() -> String {
    match time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339) {
        Ok(ts) => ts,
        Err(e) => {
            debug!("Timestamp format failed: {e}");
            String::from("1970-01-01T00:00:00Z")
        }
    }
}
