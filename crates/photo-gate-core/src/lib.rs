//! Photo Gate Core - Photo quality scoring engine
//!
//! Decodes image bytes, measures brightness, contrast and sharpness proxies,
//! combines them into a 0-100 quality score and produces a pass/fail verdict
//! with ordered recommendations.
//!
//! ```
//! use photo_gate_core::{analyze_image, QualityMetrics};
//!
//! // Undecodable input never errors; it yields the neutral sentinel.
//! assert_eq!(analyze_image(b"not an image"), QualityMetrics::neutral_fallback());
//! ```

pub mod domain;
pub mod modules;
pub mod pipeline;
pub mod ports;

pub use domain::{
    AnalysisError, AnalysisRecord, ComputeError, ConfigError, DecodeError, ImageBytes,
    ImageDimensions, PixelBuffer, QualityMetrics, QualityStatus,
};
pub use modules::{FeedbackConfig, ScoringConfig};
pub use pipeline::{
    analyze_image, AnalysisOutcome, AnalyzerConfig, Assessment, FailurePolicy, QualityAnalyzer,
};
pub use ports::{ImageSource, ProgressEvent, ProgressSink, ResultOutput};
