//! Pixel decoder.
//!
//! Turns encoded bytes into an 8-bit [`PixelBuffer`]. Grey images keep a
//! single channel, everything else is normalized to RGB. Alpha is dropped.

use image::{ColorType, DynamicImage};
use tracing::debug;

use crate::domain::{DecodeError, PixelBuffer};

/// Decodes encoded image bytes.
///
/// # Errors
///
/// Returns [`DecodeError`] for empty, corrupt, truncated or unsupported
/// input and for images without pixels.
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image = image::load_from_memory(bytes)?;
    debug!(
        "Decoded {}x{} image ({:?})",
        image.width(),
        image.height(),
        image.color()
    );

    from_dynamic(&image)
}

/// Converts an already-decoded image into a [`PixelBuffer`].
///
/// # Errors
///
/// Returns [`DecodeError::ZeroArea`] for images without pixels.
pub fn from_dynamic(image: &DynamicImage) -> Result<PixelBuffer, DecodeError> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Err(DecodeError::ZeroArea { width, height });
    }

    let (channels, samples) = if is_grey(image.color()) {
        (1, image.to_luma8().into_raw())
    } else {
        (3, image.to_rgb8().into_raw())
    };

    PixelBuffer::new(width, height, channels, samples).map_err(DecodeError::Layout)
}

const fn is_grey(color: ColorType) -> bool {
    matches!(
        color,
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16
    )
}
