//! Core domain types for photo quality scoring.

mod buffer;
mod error;
mod metrics;
mod result;

pub use buffer::{ImageBytes, ImageDimensions, PixelBuffer};
pub use error::{AnalysisError, ComputeError, ConfigError, DecodeError};
pub use metrics::{
    ChannelStatistics, ChannelStats, EdgeResponse, QualityBand, QualityMetrics, QualityStatus,
    Recommendation, ANALYSIS_UNAVAILABLE, NEUTRAL_METRIC,
};
pub use result::AnalysisRecord;
