//! Configuration file support for photo-gate.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/photo-gate/config.toml` (lowest priority)
//! - Project-local: `.photo-gate.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use photo_gate_core::{AnalyzerConfig, FeedbackConfig, ScoringConfig};
use serde::Deserialize;
use tracing::{debug, info, warn};

const CONFIG_DIR: &str = "photo-gate";
const PROJECT_CONFIG: &str = ".photo-gate.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Calibration divisors and metric weights.
    pub scoring: ScoringSection,
    /// Verdict, band and recommendation thresholds.
    pub feedback: FeedbackSection,
    /// Output formatting settings.
    pub output: OutputConfig,
    /// Failure handling.
    pub policy: PolicyConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Scoring calibration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Channel mean mapped to brightness 100.
    pub brightness_divisor: Option<f64>,
    /// Channel stdev mapped to contrast 100.
    pub contrast_divisor: Option<f64>,
    /// Edge response stdev mapped to sharpness 100.
    pub sharpness_divisor: Option<f64>,
    /// Brightness weight in the quality score.
    pub brightness_weight: Option<f64>,
    /// Contrast weight in the quality score.
    pub contrast_weight: Option<f64>,
    /// Sharpness weight in the quality score.
    pub sharpness_weight: Option<f64>,
}

/// Feedback thresholds, all 0-100.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackSection {
    /// Minimum passing quality score.
    pub pass_threshold: Option<u8>,
    /// Minimum "Excellent" quality score.
    pub excellent_threshold: Option<u8>,
    /// Minimum "Fair" quality score.
    pub fair_threshold: Option<u8>,
    /// Brightness below this asks for more light.
    pub low_brightness: Option<u8>,
    /// Brightness above this asks for less light.
    pub high_brightness: Option<u8>,
    /// Contrast below this asks for more contrast.
    pub low_contrast: Option<u8>,
    /// Sharpness below this asks for a steadier shot.
    pub low_sharpness: Option<u8>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Include EXIF metadata.
    pub exif: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

/// Failure handling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// "open" or "closed".
    pub failure: Option<String>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/photo-gate/config.toml`
    /// 2. Project-local: `.photo-gate.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load XDG config (lowest priority)
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

        // Load project-local config (higher priority, merged)
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

    /// Validate the values the core does not check itself.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        if let Some(ref p) = self.policy.failure {
            if p != "open" && p != "closed" {
                return Err(format!(
                    "policy.failure must be 'open' or 'closed', got '{p}'"
                ));
            }
        }

        self.analyzer_config()
            .validate()
            .map_err(|e| e.to_string())
    }

    /// Builds the core analyzer configuration over hardcoded defaults.
    ///
    /// Band thresholds the file leaves unset follow its pass threshold, so
    /// `pass_threshold = 90` alone raises `excellent` to 90. The result is
    /// not validated.
    #[must_use]
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        let s = ScoringConfig::default();
        let f = FeedbackConfig::default();
        let scoring = &self.scoring;
        let feedback = &self.feedback;
        let pass = feedback.pass_threshold.unwrap_or(f.pass_threshold);

        AnalyzerConfig {
            scoring: ScoringConfig {
                brightness_divisor: scoring.brightness_divisor.unwrap_or(s.brightness_divisor),
                contrast_divisor: scoring.contrast_divisor.unwrap_or(s.contrast_divisor),
                sharpness_divisor: scoring.sharpness_divisor.unwrap_or(s.sharpness_divisor),
                brightness_weight: scoring.brightness_weight.unwrap_or(s.brightness_weight),
                contrast_weight: scoring.contrast_weight.unwrap_or(s.contrast_weight),
                sharpness_weight: scoring.sharpness_weight.unwrap_or(s.sharpness_weight),
            },
            feedback: FeedbackConfig {
                pass_threshold: pass,
                excellent_threshold: feedback
                    .excellent_threshold
                    .unwrap_or_else(|| f.excellent_threshold.max(pass)),
                fair_threshold: feedback
                    .fair_threshold
                    .unwrap_or_else(|| f.fair_threshold.min(pass)),
                low_brightness: feedback.low_brightness.unwrap_or(f.low_brightness),
                high_brightness: feedback.high_brightness.unwrap_or(f.high_brightness),
                low_contrast: feedback.low_contrast.unwrap_or(f.low_contrast),
                low_sharpness: feedback.low_sharpness.unwrap_or(f.low_sharpness),
            },
        }
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // General
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        // Scoring
        let (mine, theirs) = (&mut self.scoring, other.scoring);
        mine.brightness_divisor = theirs.brightness_divisor.or(mine.brightness_divisor);
        mine.contrast_divisor = theirs.contrast_divisor.or(mine.contrast_divisor);
        mine.sharpness_divisor = theirs.sharpness_divisor.or(mine.sharpness_divisor);
        mine.brightness_weight = theirs.brightness_weight.or(mine.brightness_weight);
        mine.contrast_weight = theirs.contrast_weight.or(mine.contrast_weight);
        mine.sharpness_weight = theirs.sharpness_weight.or(mine.sharpness_weight);

        // Feedback
        let (mine, theirs) = (&mut self.feedback, other.feedback);
        mine.pass_threshold = theirs.pass_threshold.or(mine.pass_threshold);
        mine.excellent_threshold = theirs.excellent_threshold.or(mine.excellent_threshold);
        mine.fair_threshold = theirs.fair_threshold.or(mine.fair_threshold);
        mine.low_brightness = theirs.low_brightness.or(mine.low_brightness);
        mine.high_brightness = theirs.high_brightness.or(mine.high_brightness);
        mine.low_contrast = theirs.low_contrast.or(mine.low_contrast);
        mine.low_sharpness = theirs.low_sharpness.or(mine.low_sharpness);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.exif = other.output.exif.or(self.output.exif);
        self.output.progress = other.output.progress.or(self.output.progress);

        // Policy
        self.policy.failure = other.policy.failure.or_else(|| self.policy.failure.take());
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.photo-gate.toml` in the given directory and its parents.
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
        assert!(config.scoring.sharpness_divisor.is_none());
        assert!(config.feedback.pass_threshold.is_none());
        assert!(config.policy.failure.is_none());
        assert_eq!(config.analyzer_config(), AnalyzerConfig::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.general.recursive.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[scoring]
brightness_divisor = 250.0
contrast_divisor = 100.0
sharpness_divisor = 40.0
brightness_weight = 0.2
contrast_weight = 0.3
sharpness_weight = 0.5

[feedback]
pass_threshold = 55
excellent_threshold = 85
fair_threshold = 35
low_brightness = 20
high_brightness = 90
low_contrast = 15
low_sharpness = 30

[output]
format = 'json'
pretty = true
exif = true
progress = false

[policy]
failure = 'closed'
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.scoring.sharpness_divisor, Some(40.0));
        assert_eq!(config.feedback.pass_threshold, Some(55));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.policy.failure, Some("closed".to_string()));
        assert!(config.validate().is_ok());

        let analyzer = config.analyzer_config();
        assert_eq!(analyzer.scoring.brightness_weight, 0.2);
        assert_eq!(analyzer.feedback.low_sharpness, 30);
    }

    #[test]
    fn test_partial_sections_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r"
[feedback]
pass_threshold = 70
",
        )
        .expect("parse partial feedback");

        let analyzer = config.analyzer_config();
        assert_eq!(analyzer.feedback.pass_threshold, 70);
        assert_eq!(analyzer.feedback.excellent_threshold, 80);
        assert_eq!(analyzer.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_merge_configs() {
        let mut base: AppConfig = toml::from_str(
            r"
[scoring]
sharpness_divisor = 60.0
contrast_divisor = 120.0

[output]
format = 'json'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[scoring]
sharpness_divisor = 45.0

[policy]
failure = 'closed'
",
        )
        .expect("parse override");

        base.merge(override_config);

        // Overridden
        assert_eq!(base.scoring.sharpness_divisor, Some(45.0));
        // Preserved from base
        assert_eq!(base.scoring.contrast_divisor, Some(120.0));
        assert_eq!(base.output.format, Some("json".to_string()));
        // Added from override
        assert_eq!(base.policy.failure, Some("closed".to_string()));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[feedback]
low_contrast = 10
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.feedback.low_contrast, Some(10));
    }

    #[test]
    fn test_merge_all_sections() {
        let mut base: AppConfig = toml::from_str(
            r"
[general]
recursive = false

[feedback]
pass_threshold = 60

[output]
format = 'json'

[policy]
failure = 'open'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[feedback]
pass_threshold = 65

[output]
format = 'jsonl'

[policy]
failure = 'closed'
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.general.recursive, Some(true));
        assert_eq!(base.feedback.pass_threshold, Some(65));
        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.policy.failure, Some("closed".to_string()));
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().expect("tempdir");
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).expect("mkdir");
        std::fs::write(root.path().join(PROJECT_CONFIG), "").expect("write config");

        let found = find_config_in_parents(&nested).expect("config found");
        assert_eq!(found, root.path().join(PROJECT_CONFIG));
    }

    #[test]
    fn test_load_file_rejects_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[scoring\nsharpness_divisor = 1.0\n").expect("write");

        assert!(load_file(&path).is_none());
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[feedback]
pass_threshold = "sixty"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_threshold_over_u8_is_parse_error() {
        let result: Result<AppConfig, _> = toml::from_str("[feedback]\nlow_sharpness = 300\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_policy_invalid() {
        let mut config = AppConfig::default();
        config.policy.failure = Some("sometimes".to_string());

        assert!(config.validate().unwrap_err().contains("policy.failure"));
    }

    #[test]
    fn test_validate_reports_core_errors() {
        let mut config = AppConfig::default();
        config.scoring.sharpness_divisor = Some(0.0);
        assert!(config.validate().unwrap_err().contains("scoring.sharpness_divisor"));

        let mut config = AppConfig::default();
        config.feedback.low_brightness = Some(120);
        assert!(config.validate().unwrap_err().contains("feedback.low_brightness"));
    }

    #[test]
    fn test_lone_pass_threshold_drags_unset_bands() {
        let config: AppConfig = toml::from_str("[feedback]\npass_threshold = 90\n").unwrap();
        assert!(config.validate().is_ok());

        let feedback = config.analyzer_config().feedback;
        assert_eq!(feedback.pass_threshold, 90);
        assert_eq!(feedback.excellent_threshold, 90);
        assert_eq!(feedback.fair_threshold, 40);

        let low: AppConfig = toml::from_str("[feedback]\npass_threshold = 30\n").unwrap();
        assert_eq!(low.analyzer_config().feedback.fair_threshold, 30);
        assert!(low.validate().is_ok());
    }

    #[test]
    fn test_explicit_band_conflict_still_reported() {
        let config: AppConfig = toml::from_str(
            r"
[feedback]
pass_threshold = 90
excellent_threshold = 85
",
        )
        .unwrap();

        assert!(config.validate().unwrap_err().contains("excellent >= pass >= fair"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
