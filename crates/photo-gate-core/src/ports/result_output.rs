//! Result output port for writing analysis records.

use crate::domain::AnalysisRecord;

/// Port for outputting analysis results.
pub trait ResultOutput: Send + Sync {
    /// Writes a single analysis record.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write(&self, record: &AnalysisRecord) -> anyhow::Result<()>;

    /// Flushes any buffered output.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    fn flush(&self) -> anyhow::Result<()>;
}
