//! Per-image analysis records handed to output adapters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{ImageDimensions, QualityMetrics};

/// Complete analysis record for a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Path to the analyzed image.
    pub path: String,
    /// Timestamp of analysis (ISO 8601).
    pub timestamp: String,
    /// Image dimensions, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
    /// Scoring result (a fallback payload when `error` is set).
    #[serde(flatten)]
    pub metrics: QualityMetrics,
    /// Why analysis fell back, if it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Optional EXIF metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exif: Option<HashMap<String, String>>,
}
