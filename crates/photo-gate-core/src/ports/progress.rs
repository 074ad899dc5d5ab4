//! Progress reporting port for UI integration.

use crate::domain::AnalysisRecord;

/// Events emitted during analysis for progress tracking.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Analysis started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Analysis completed for an image.
    Completed {
        /// The analysis record.
        record: AnalysisRecord,
    },
    /// An image could not be read and was skipped.
    Skipped {
        /// Path to the image.
        path: String,
        /// Reason for skipping.
        reason: String,
    },
    /// All images have been processed.
    Finished {
        /// Total images processed successfully.
        processed: usize,
        /// Total images skipped.
        skipped: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
