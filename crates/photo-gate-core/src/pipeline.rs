//! End-to-end scoring pipeline.
//!
//! `try_analyze` surfaces every failure as an [`AnalysisError`]. Turning a
//! failure into a usable result is an explicit caller decision, expressed
//! with [`FailurePolicy`]. [`analyze_image`] is the fail-open shorthand.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::domain::{AnalysisError, ConfigError, ImageBytes, ImageDimensions, QualityMetrics};
use crate::modules::{decoder, feedback, scoring, sharpness, statistics};
use crate::modules::{FeedbackConfig, ScoringConfig};

/// Numeric policy for scoring and feedback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyzerConfig {
    /// Calibration divisors and weights.
    pub scoring: ScoringConfig,
    /// Verdict, band and rule thresholds.
    pub feedback: FeedbackConfig,
}

impl AnalyzerConfig {
    /// Validates both sections.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scoring.validate()?;
        self.feedback.validate()
    }
}

/// What to return when analysis fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Never block the capture workflow: return the neutral passing sentinel.
    #[default]
    FailOpen,
    /// Treat an unanalyzable photo as a failed one.
    FailClosed,
}

impl FailurePolicy {
    /// The payload this policy substitutes for a failed analysis.
    #[must_use]
    pub fn fallback(self) -> QualityMetrics {
        match self {
            Self::FailOpen => QualityMetrics::neutral_fallback(),
            Self::FailClosed => QualityMetrics::closed_fallback(),
        }
    }
}

/// Successful analysis of one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    /// Scoring result.
    pub metrics: QualityMetrics,
    /// Decoded image size.
    pub dimensions: ImageDimensions,
}

/// Result of analyzing one image under a [`FailurePolicy`].
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Scoring result or the policy's fallback.
    pub metrics: QualityMetrics,
    /// Decoded image size, if decoding succeeded.
    pub dimensions: Option<ImageDimensions>,
    /// The failure that triggered the fallback.
    pub error: Option<AnalysisError>,
}

impl AnalysisOutcome {
    /// Whether the metrics are a fallback payload.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

/// Scores photos. Holds only immutable configuration, so one instance can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct QualityAnalyzer {
    config: AnalyzerConfig,
}

impl QualityAnalyzer {
    /// Creates an analyzer after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any value is out of range.
    pub fn new(config: AnalyzerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the analyzer configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs the full pipeline, surfacing any failure.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Decode`] for unusable bytes and
    /// [`AnalysisError::Compute`] for numeric failures.
    pub fn try_analyze(&self, bytes: &[u8]) -> Result<Assessment, AnalysisError> {
        let start = Instant::now();
        let buffer = decoder::decode(bytes)?;

        let (stats, edge) = rayon::join(
            || statistics::collect(&buffer),
            || sharpness::estimate(&buffer),
        );
        let (stats, edge) = (stats?, edge?);

        let scores = scoring::score(&stats, &edge, &self.config.scoring)?;
        let metrics = feedback::evaluate(&scores, &self.config.feedback);

        debug!(
            "Analyzed {}x{} image in {:.2}ms: {:?}",
            buffer.width(),
            buffer.height(),
            start.elapsed().as_secs_f64() * 1000.0,
            metrics.status
        );

        Ok(Assessment {
            metrics,
            dimensions: buffer.dimensions(),
        })
    }

    /// Runs the pipeline and applies `policy` on failure.
    ///
    /// Failures are logged, never returned as errors.
    #[must_use]
    pub fn analyze(&self, bytes: &[u8], policy: FailurePolicy) -> AnalysisOutcome {
        match self.try_analyze(bytes) {
            Ok(assessment) => AnalysisOutcome {
                metrics: assessment.metrics,
                dimensions: Some(assessment.dimensions),
                error: None,
            },
            Err(e) => {
                warn!("Quality analysis failed ({policy:?}): {e}");
                AnalysisOutcome {
                    metrics: policy.fallback(),
                    dimensions: None,
                    error: Some(e),
                }
            }
        }
    }

    /// Analyzes several images in parallel; output order matches input order.
    #[must_use]
    pub fn analyze_batch(
        &self,
        images: &[ImageBytes],
        policy: FailurePolicy,
    ) -> Vec<AnalysisOutcome> {
        images
            .par_iter()
            .map(|image| self.analyze(&image.bytes, policy))
            .collect()
    }
}

/// Scores `bytes` with the default configuration, failing open.
///
/// Always returns a well-formed result; undecodable input yields
/// [`QualityMetrics::neutral_fallback`].
#[must_use]
pub fn analyze_image(bytes: &[u8]) -> QualityMetrics {
    QualityAnalyzer::default()
        .analyze(bytes, FailurePolicy::FailOpen)
        .metrics
}
