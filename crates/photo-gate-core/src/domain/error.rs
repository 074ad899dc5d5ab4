//! Error taxonomy for the scoring pipeline.

use thiserror::Error;

/// Any failure raised while analyzing a single image.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input bytes could not be turned into pixels.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A statistics or convolution stage produced an unusable value.
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// Failure to decode encoded image bytes.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("input image data is empty")]
    Empty,
    /// The codec rejected the data (truncated, corrupt or unsupported).
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    /// The image decoded but has no pixels.
    #[error("decoded image has zero area ({width}x{height})")]
    ZeroArea {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
    },
    /// Decoded samples do not fit the reported dimensions.
    #[error("decoded image has an inconsistent layout: {0}")]
    Layout(#[source] ComputeError),
}

/// Unexpected numeric or shape failure while computing statistics.
#[derive(Debug, Error)]
pub enum ComputeError {
    /// A buffer with no pixels reached a statistics stage.
    #[error("cannot compute statistics over an empty buffer")]
    EmptyBuffer,
    /// A stage produced NaN or infinity.
    #[error("{stage} produced a non-finite value")]
    NonFinite {
        /// Name of the stage that failed.
        stage: &'static str,
    },
    /// Sample storage does not match the declared dimensions.
    #[error("buffer holds {actual} samples, expected {expected}")]
    ShapeMismatch {
        /// Samples implied by width x height x channels.
        expected: usize,
        /// Samples actually present.
        actual: usize,
    },
}

/// Invalid scoring or feedback configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A calibration divisor must be finite and strictly positive.
    #[error("{name} must be a finite value greater than 0, got {value}")]
    InvalidDivisor {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A weight must be finite and non-negative.
    #[error("{name} must be a finite value of at least 0, got {value}")]
    InvalidWeight {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A threshold lies outside the 0-100 metric range.
    #[error("{name} must be within 0-100, got {value}")]
    ThresholdOutOfRange {
        /// Field name.
        name: &'static str,
        /// Offending value.
        value: u8,
    },
    /// Summary band thresholds are not ordered `excellent >= pass >= fair`.
    #[error("band thresholds must satisfy excellent >= pass >= fair, got {excellent} / {pass} / {fair}")]
    BandOrder {
        /// Excellent band floor.
        excellent: u8,
        /// Pass threshold.
        pass: u8,
        /// Fair band floor.
        fair: u8,
    },
}
