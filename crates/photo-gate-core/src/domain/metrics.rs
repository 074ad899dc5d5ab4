//! Statistics and quality metrics produced by the pipeline.

use serde::{Deserialize, Serialize};

/// Summary shown when analysis could not run.
pub const ANALYSIS_UNAVAILABLE: &str = "quality analysis unavailable";

/// Value every numeric metric takes in the fallback payloads.
pub const NEUTRAL_METRIC: u8 = 50;

/// Mean and population standard deviation of one channel, in 0-255 units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub stdev: f64,
}

/// Per-channel statistics for a whole buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStatistics {
    /// One entry per channel, in buffer order.
    pub channels: Vec<ChannelStats>,
}

impl ChannelStatistics {
    /// Mean of the per-channel means, or `None` without channels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_of_means(&self) -> Option<f64> {
        if self.channels.is_empty() {
            return None;
        }
        let sum: f64 = self.channels.iter().map(|c| c.mean).sum();
        Some(sum / self.channels.len() as f64)
    }

    /// Mean of the per-channel standard deviations, or `None` without channels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_of_stdevs(&self) -> Option<f64> {
        if self.channels.is_empty() {
            return None;
        }
        let sum: f64 = self.channels.iter().map(|c| c.stdev).sum();
        Some(sum / self.channels.len() as f64)
    }
}

/// Standard deviation of the luminance high-pass response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeResponse {
    /// Population standard deviation of the filter output.
    pub stdev: f64,
}

/// Pass/fail verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityStatus {
    /// Photo may proceed to review.
    Pass,
    /// Photo should be retaken.
    Fail,
}

/// Summary band for the overall quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityBand {
    /// Score at or above the excellent floor.
    Excellent,
    /// Passing score below the excellent floor.
    Good,
    /// Failing score at or above the fair floor.
    Fair,
    /// Everything else.
    Poor,
}

impl QualityBand {
    /// User-facing summary for this band.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair, consider retaking",
            Self::Poor => "Poor, retake recommended",
        }
    }
}

/// Actionable advice emitted by the feedback rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// Image is too dark.
    IncreaseLighting,
    /// Image is too bright.
    ReduceLighting,
    /// Tonal spread is too narrow.
    ImproveContrast,
    /// Too little edge energy.
    ImproveFocus,
    /// Analysis failed and the gate is closed.
    RetakePhoto,
}

impl Recommendation {
    /// User-facing text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::IncreaseLighting => "increase lighting",
            Self::ReduceLighting => "reduce lighting",
            Self::ImproveContrast => "improve contrast",
            Self::ImproveFocus => "hold steady / improve focus",
            Self::RetakePhoto => "retake photo",
        }
    }
}

/// Final scoring result for one image.
///
/// All numeric fields are within 0-100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// Weighted combination of the three proxies.
    pub quality_score: u8,
    /// Mean channel intensity scaled to 0-100.
    pub brightness_level: u8,
    /// Mean channel spread scaled to 0-100.
    pub contrast_score: u8,
    /// Edge energy scaled to 0-100.
    pub sharpness_rating: u8,
    /// Pass/fail verdict.
    pub status: QualityStatus,
    /// Summary message.
    pub feedback: String,
    /// Ordered recommendations, possibly empty.
    pub recommendations: Vec<String>,
}

impl QualityMetrics {
    /// Sentinel returned when analysis fails under a fail-open policy.
    ///
    /// Callers compare against this exact payload to detect skipped analysis.
    #[must_use]
    pub fn neutral_fallback() -> Self {
        Self {
            quality_score: NEUTRAL_METRIC,
            brightness_level: NEUTRAL_METRIC,
            contrast_score: NEUTRAL_METRIC,
            sharpness_rating: NEUTRAL_METRIC,
            status: QualityStatus::Pass,
            feedback: ANALYSIS_UNAVAILABLE.to_string(),
            recommendations: Vec::new(),
        }
    }

    /// Result returned when analysis fails under a fail-closed policy.
    #[must_use]
    pub fn closed_fallback() -> Self {
        Self {
            status: QualityStatus::Fail,
            recommendations: vec![Recommendation::RetakePhoto.message().to_string()],
            ..Self::neutral_fallback()
        }
    }

    /// Whether the verdict is a pass.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == QualityStatus::Pass
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_fallback_payload() {
        let neutral = QualityMetrics::neutral_fallback();
        assert_eq!(neutral.quality_score, 50);
        assert_eq!(neutral.brightness_level, 50);
        assert_eq!(neutral.contrast_score, 50);
        assert_eq!(neutral.sharpness_rating, 50);
        assert_eq!(neutral.status, QualityStatus::Pass);
        assert_eq!(neutral.feedback, "quality analysis unavailable");
        assert!(neutral.recommendations.is_empty());
    }

    #[test]
    fn test_neutral_fallback_json_shape() {
        let json = serde_json::to_string(&QualityMetrics::neutral_fallback()).expect("serialize");
        assert_eq!(
            json,
            r#"{"qualityScore":50,"brightnessLevel":50,"contrastScore":50,"sharpnessRating":50,"status":"pass","feedback":"quality analysis unavailable","recommendations":[]}"#
        );
    }

    #[test]
    fn test_closed_fallback_fails() {
        let closed = QualityMetrics::closed_fallback();
        assert_eq!(closed.status, QualityStatus::Fail);
        assert_eq!(closed.quality_score, 50);
        assert_eq!(closed.feedback, ANALYSIS_UNAVAILABLE);
        assert_eq!(closed.recommendations, vec!["retake photo".to_string()]);
    }

    #[test]
    fn test_channel_statistics_averages() {
        let stats = ChannelStatistics {
            channels: vec![
                ChannelStats {
                    mean: 10.0,
                    stdev: 1.0,
                },
                ChannelStats {
                    mean: 20.0,
                    stdev: 2.0,
                },
                ChannelStats {
                    mean: 30.0,
                    stdev: 6.0,
                },
            ],
        };
        assert_eq!(stats.mean_of_means(), Some(20.0));
        assert_eq!(stats.mean_of_stdevs(), Some(3.0));
    }

    #[test]
    fn test_channel_statistics_empty() {
        let stats = ChannelStatistics { channels: vec![] };
        assert!(stats.mean_of_means().is_none());
        assert!(stats.mean_of_stdevs().is_none());
    }
}
