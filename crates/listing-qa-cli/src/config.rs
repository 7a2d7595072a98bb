//! Configuration file support for listing-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/listing-qa/config.toml` (lowest priority)
//! - Project-local: `.listing-qa.toml` (searched up directory tree)
//! - Environment and CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// File name of the project-local config.
const PROJECT_CONFIG: &str = ".listing-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scoring thresholds.
    pub scoring: ScoringConfig,
    /// Corner edge detection settings.
    pub watermark: WatermarkConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Scoring thresholds.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Laplacian variance below which an image is blurry.
    pub blur_threshold: Option<f64>,
    /// Corner edge density at or above which an image is watermarked.
    pub watermark_edge_density: Option<f64>,
    /// Minimum quality score for the gate to pass.
    pub min_quality_score: Option<i32>,
}

/// Canny hysteresis thresholds for the watermark check.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct WatermarkConfig {
    /// Lower hysteresis threshold.
    pub canny_low: Option<f32>,
    /// Upper hysteresis threshold.
    pub canny_high: Option<f32>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/listing-qa/config.toml`
    /// 2. Project-local: `.listing-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.scoring.blur_threshold {
            if t < 0.0 {
                return Err(format!("scoring.blur_threshold must be >= 0, got {t}"));
            }
        }
        if let Some(d) = self.scoring.watermark_edge_density {
            if !(0.0..=1.0).contains(&d) {
                return Err(format!(
                    "scoring.watermark_edge_density must be 0.0-1.0, got {d}"
                ));
            }
        }
        if let Some(s) = self.scoring.min_quality_score {
            if !(0..=100).contains(&s) {
                return Err(format!(
                    "scoring.min_quality_score must be 0-100, got {s}"
                ));
            }
        }
        if let (Some(low), Some(high)) = (self.watermark.canny_low, self.watermark.canny_high) {
            if low > high {
                return Err(format!(
                    "watermark.canny_low ({low}) must not exceed watermark.canny_high ({high})"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.scoring.blur_threshold = other.scoring.blur_threshold.or(self.scoring.blur_threshold);
        self.scoring.watermark_edge_density = other
            .scoring
            .watermark_edge_density
            .or(self.scoring.watermark_edge_density);
        self.scoring.min_quality_score = other
            .scoring
            .min_quality_score
            .or(self.scoring.min_quality_score);

        self.watermark.canny_low = other.watermark.canny_low.or(self.watermark.canny_low);
        self.watermark.canny_high = other.watermark.canny_high.or(self.watermark.canny_high);

        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("listing-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.listing-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.scoring.blur_threshold.is_none());
        assert!(config.watermark.canny_low.is_none());
        assert!(config.output.pretty.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[scoring]
blur_threshold = 90.0
watermark_edge_density = 0.2
min_quality_score = 60

[watermark]
canny_low = 50.0
canny_high = 150.0

[output]
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.scoring.blur_threshold, Some(90.0));
        assert_eq!(config.scoring.watermark_edge_density, Some(0.2));
        assert_eq!(config.scoring.min_quality_score, Some(60));
        assert_eq!(config.watermark.canny_low, Some(50.0));
        assert_eq!(config.watermark.canny_high, Some(150.0));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig = toml::from_str(
            r"
[scoring]
min_quality_score = 80
",
        )
        .expect("parse partial config");

        assert_eq!(config.scoring.min_quality_score, Some(80));
        assert!(config.scoring.blur_threshold.is_none());
        assert!(config.watermark.canny_high.is_none());
    }

    #[test]
    fn test_merge_override_wins() {
        let mut base: AppConfig = toml::from_str(
            r"
[scoring]
blur_threshold = 100.0
min_quality_score = 50

[output]
pretty = true
",
        )
        .expect("parse base");

        let project: AppConfig = toml::from_str(
            r"
[scoring]
blur_threshold = 140.0

[watermark]
canny_low = 80.0
",
        )
        .expect("parse override");

        base.merge(project);

        assert_eq!(base.scoring.blur_threshold, Some(140.0));
        assert_eq!(base.scoring.min_quality_score, Some(50));
        assert_eq!(base.watermark.canny_low, Some(80.0));
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[scoring]
watermark_edge_density = 0.3
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.scoring.watermark_edge_density, Some(0.3));
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
[scoring]
blur_threshold = "sharp"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_negative_blur_threshold() {
        let mut config = AppConfig::default();
        config.scoring.blur_threshold = Some(-1.0);

        let err = config.validate().unwrap_err();
        assert!(err.contains("scoring.blur_threshold"));
    }

    #[test]
    fn test_validate_density_out_of_range() {
        let mut config = AppConfig::default();
        config.scoring.watermark_edge_density = Some(1.5);

        let err = config.validate().unwrap_err();
        assert!(err.contains("scoring.watermark_edge_density"));
    }

    #[test]
    fn test_validate_min_score_out_of_range() {
        let mut config = AppConfig::default();
        config.scoring.min_quality_score = Some(101);

        let err = config.validate().unwrap_err();
        assert!(err.contains("scoring.min_quality_score"));
    }

    #[test]
    fn test_validate_canny_order() {
        let mut config = AppConfig::default();
        config.watermark.canny_low = Some(200.0);
        config.watermark.canny_high = Some(100.0);

        let err = config.validate().unwrap_err();
        assert!(err.contains("watermark.canny_low"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("listings").join("spring");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(PROJECT_CONFIG), "").unwrap();

        let found = find_config_in_parents(&nested).expect("config should be found");
        assert_eq!(found, root.path().join(PROJECT_CONFIG));
    }

    #[test]
    fn test_load_file_rejects_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PROJECT_CONFIG);
        std::fs::write(&path, "[scoring\nblur_threshold = 1").unwrap();

        assert!(load_file(&path).is_none());
    }
}
