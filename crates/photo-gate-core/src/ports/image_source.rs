//! Image source port for loading encoded images from various sources.

use crate::domain::ImageBytes;

/// Port for loading encoded image bytes from a source.
///
/// Sources only fetch bytes; decoding belongs to the pipeline.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over images from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an image cannot be read.
    fn images(&self) -> Box<dyn Iterator<Item = anyhow::Result<ImageBytes>> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
