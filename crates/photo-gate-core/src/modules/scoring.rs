//! Metric normalizer and scorer.
//!
//! Maps raw statistics onto 0-100 metrics and combines them. The divisors
//! are empirical calibration constants, not derived quantities.

use tracing::debug;

use crate::domain::{ChannelStatistics, ComputeError, ConfigError, EdgeResponse};

/// Calibration and weighting for the scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Channel mean that maps to brightness 100.
    pub brightness_divisor: f64,
    /// Channel standard deviation that maps to contrast 100.
    pub contrast_divisor: f64,
    /// Edge response standard deviation that maps to sharpness 100.
    pub sharpness_divisor: f64,
    /// Weight of brightness in the quality score.
    pub brightness_weight: f64,
    /// Weight of contrast in the quality score.
    pub contrast_weight: f64,
    /// Weight of sharpness in the quality score.
    pub sharpness_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            brightness_divisor: 255.0,
            contrast_divisor: 128.0,
            sharpness_divisor: 50.0,
            brightness_weight: 0.3,
            contrast_weight: 0.3,
            // Focus defects are the least recoverable downstream.
            sharpness_weight: 0.4,
        }
    }
}

impl ScoringConfig {
    /// Checks that divisors are positive and weights non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("scoring.brightness_divisor", self.brightness_divisor),
            ("scoring.contrast_divisor", self.contrast_divisor),
            ("scoring.sharpness_divisor", self.sharpness_divisor),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidDivisor { name, value });
            }
        }
        for (name, value) in [
            ("scoring.brightness_weight", self.brightness_weight),
            ("scoring.contrast_weight", self.contrast_weight),
            ("scoring.sharpness_weight", self.sharpness_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// The four bounded metrics, before feedback is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scores {
    /// Overall quality, 0-100.
    pub quality: u8,
    /// Brightness, 0-100.
    pub brightness: u8,
    /// Contrast, 0-100.
    pub contrast: u8,
    /// Sharpness, 0-100.
    pub sharpness: u8,
}

/// Rounds half away from zero and clamps into 0-100.
///
/// # Errors
///
/// Returns [`ComputeError::NonFinite`] for NaN or infinite input.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamp_percent(value: f64, stage: &'static str) -> Result<u8, ComputeError> {
    if !value.is_finite() {
        return Err(ComputeError::NonFinite { stage });
    }
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

fn scale(raw: f64, divisor: f64, stage: &'static str) -> Result<u8, ComputeError> {
    clamp_percent(raw / divisor * 100.0, stage)
}

/// Normalizes raw statistics and computes the weighted quality score.
///
/// # Errors
///
/// Returns [`ComputeError`] when there are no channels or any intermediate
/// value is not finite.
pub fn score(
    stats: &ChannelStatistics,
    edge: &EdgeResponse,
    config: &ScoringConfig,
) -> Result<Scores, ComputeError> {
    let mean = stats.mean_of_means().ok_or(ComputeError::EmptyBuffer)?;
    let spread = stats.mean_of_stdevs().ok_or(ComputeError::EmptyBuffer)?;

    let brightness = scale(mean, config.brightness_divisor, "brightness")?;
    let contrast = scale(spread, config.contrast_divisor, "contrast")?;
    let sharpness = scale(edge.stdev, config.sharpness_divisor, "sharpness")?;

    let weighted = f64::from(brightness) * config.brightness_weight
        + f64::from(contrast) * config.contrast_weight
        + f64::from(sharpness) * config.sharpness_weight;
    let quality = clamp_percent(weighted, "quality score")?;

    debug!(
        "Scores: quality={quality} brightness={brightness} contrast={contrast} sharpness={sharpness}"
    );

    Ok(Scores {
        quality,
        brightness,
        contrast,
        sharpness,
    })
}
