//! Feedback rule engine.
//!
//! Turns scores into a verdict, a summary band and recommendations. Rules
//! are independent and evaluated in a fixed order; each fires at most once.

use super::scoring::Scores;
use crate::domain::{ConfigError, QualityBand, QualityMetrics, QualityStatus, Recommendation};

/// Thresholds for the verdict, summary bands and recommendation rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// Minimum quality score that passes.
    pub pass_threshold: u8,
    /// Minimum quality score summarized as excellent.
    pub excellent_threshold: u8,
    /// Minimum quality score summarized as fair.
    pub fair_threshold: u8,
    /// Brightness below this asks for more light.
    pub low_brightness: u8,
    /// Brightness above this asks for less light.
    pub high_brightness: u8,
    /// Contrast below this asks for more contrast.
    pub low_contrast: u8,
    /// Sharpness below this asks for a steadier shot.
    pub low_sharpness: u8,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            pass_threshold: 60,
            excellent_threshold: 80,
            fair_threshold: 40,
            low_brightness: 30,
            high_brightness: 85,
            low_contrast: 25,
            low_sharpness: 40,
        }
    }
}

impl FeedbackConfig {
    /// Checks thresholds are within 0-100 and bands are ordered.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("feedback.pass_threshold", self.pass_threshold),
            ("feedback.excellent_threshold", self.excellent_threshold),
            ("feedback.fair_threshold", self.fair_threshold),
            ("feedback.low_brightness", self.low_brightness),
            ("feedback.high_brightness", self.high_brightness),
            ("feedback.low_contrast", self.low_contrast),
            ("feedback.low_sharpness", self.low_sharpness),
        ] {
            if value > 100 {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if !(self.excellent_threshold >= self.pass_threshold
            && self.pass_threshold >= self.fair_threshold)
        {
            return Err(ConfigError::BandOrder {
                excellent: self.excellent_threshold,
                pass: self.pass_threshold,
                fair: self.fair_threshold,
            });
        }
        Ok(())
    }

    /// Moves the pass threshold, pulling `excellent` up and `fair` down as
    /// needed so the bands stay ordered.
    #[must_use]
    pub fn with_pass_threshold(mut self, pass: u8) -> Self {
        self.pass_threshold = pass;
        self.excellent_threshold = self.excellent_threshold.max(pass);
        self.fair_threshold = self.fair_threshold.min(pass);
        self
    }

    /// Pass iff the quality score reaches the pass threshold.
    #[must_use]
    pub const fn status(&self, quality: u8) -> QualityStatus {
        if quality >= self.pass_threshold {
            QualityStatus::Pass
        } else {
            QualityStatus::Fail
        }
    }

    /// First matching band, from the top down.
    #[must_use]
    pub const fn band(&self, quality: u8) -> QualityBand {
        if quality >= self.excellent_threshold {
            QualityBand::Excellent
        } else if quality >= self.pass_threshold {
            QualityBand::Good
        } else if quality >= self.fair_threshold {
            QualityBand::Fair
        } else {
            QualityBand::Poor
        }
    }

    /// Recommendations in check order: dark, bright, flat, soft.
    #[must_use]
    pub fn recommendations(&self, scores: &Scores) -> Vec<Recommendation> {
        let rules = [
            (
                scores.brightness < self.low_brightness,
                Recommendation::IncreaseLighting,
            ),
            (
                scores.brightness > self.high_brightness,
                Recommendation::ReduceLighting,
            ),
            (
                scores.contrast < self.low_contrast,
                Recommendation::ImproveContrast,
            ),
            (
                scores.sharpness < self.low_sharpness,
                Recommendation::ImproveFocus,
            ),
        ];
        rules
            .into_iter()
            .filter_map(|(fired, recommendation)| fired.then_some(recommendation))
            .collect()
    }
}

/// Attaches verdict, summary and recommendations to the scores.
#[must_use]
pub fn evaluate(scores: &Scores, config: &FeedbackConfig) -> QualityMetrics {
    QualityMetrics {
        quality_score: scores.quality,
        brightness_level: scores.brightness,
        contrast_score: scores.contrast,
        sharpness_rating: scores.sharpness,
        status: config.status(scores.quality),
        feedback: config.band(scores.quality).message().to_string(),
        recommendations: config
            .recommendations(scores)
            .into_iter()
            .map(|r| r.message().to_string())
            .collect(),
    }
}
