//! Input types: encoded bytes and decoded pixel buffers.

use serde::{Deserialize, Serialize};

use super::ComputeError;

/// Encoded image bytes together with where they came from.
#[derive(Debug, Clone)]
pub struct ImageBytes {
    /// Source path or identifier.
    pub path: String,
    /// Raw encoded bytes (JPEG, PNG, ...).
    pub bytes: Vec<u8>,
}

impl ImageBytes {
    /// Creates a new byte payload.
    #[must_use]
    pub fn new(path: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Decoded 8-bit image, row-major with interleaved channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps interleaved samples.
    ///
    /// # Errors
    ///
    /// Returns [`ComputeError::ShapeMismatch`] if `samples` does not hold
    /// exactly `width * height * channels` values.
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        samples: Vec<u8>,
    ) -> Result<Self, ComputeError> {
        let expected = width as usize * height as usize * usize::from(channels);
        if samples.len() != expected {
            return Err(ComputeError::ShapeMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel.
    #[must_use]
    pub const fn channels(&self) -> u8 {
        self.channels
    }

    /// Width and height.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }

    /// Number of pixels.
    #[must_use]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    #[must_use]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Iterates over pixels as channel slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(usize::from(self.channels.max(1)))
    }
}
