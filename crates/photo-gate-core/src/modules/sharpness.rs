//! Edge energy estimator.
//!
//! A global sharpness proxy: the spread of the Laplacian response over the
//! luminance plane. Focused images have strong local variation and thus a
//! wide response; this is not a focus or MTF measurement.

use tracing::trace;

use super::convolution::{convolve, BorderPolicy, Kernel, Plane};
use crate::domain::{ComputeError, EdgeResponse, PixelBuffer};

/// Converts a buffer to Rec. 601 luminance.
///
/// Single-channel buffers are used as-is.
#[must_use]
pub fn luminance(buffer: &PixelBuffer) -> Plane {
    let channels = usize::from(buffer.channels());
    let width = buffer.width() as usize;
    let samples = buffer.samples();
    Plane::from_fn(buffer.width(), buffer.height(), |x, y| {
        let start = (y as usize * width + x as usize) * channels;
        luma_of(&samples[start..start + channels])
    })
}

/// Integer Rec. 601 weighting, rounded to the nearest grey level.
#[allow(clippy::cast_precision_loss)]
fn luma_of(pixel: &[u8]) -> f32 {
    match *pixel {
        [r, g, b, ..] => {
            let weighted = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b) + 500;
            (weighted / 1000) as f32
        }
        [grey, ..] => f32::from(grey),
        [] => 0.0,
    }
}

/// Population standard deviation of a plane's values.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn plane_stdev(plane: &Plane) -> f64 {
    let values = plane.values();
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = f64::from(v) - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Estimates edge energy with the 8-neighbour Laplacian and replicated borders.
///
/// # Errors
///
/// Returns [`ComputeError::EmptyBuffer`] for buffers without pixels and
/// [`ComputeError::NonFinite`] if the response spread is not finite.
pub fn estimate(buffer: &PixelBuffer) -> Result<EdgeResponse, ComputeError> {
    estimate_with(buffer, &Kernel::laplacian(), BorderPolicy::Replicate)
}

/// Estimates edge energy with an arbitrary kernel and border policy.
///
/// # Errors
///
/// See [`estimate`].
pub fn estimate_with(
    buffer: &PixelBuffer,
    kernel: &Kernel,
    border: BorderPolicy,
) -> Result<EdgeResponse, ComputeError> {
    if buffer.pixel_count() == 0 || buffer.channels() == 0 {
        return Err(ComputeError::EmptyBuffer);
    }

    let luma = luminance(buffer);
    let response = convolve(&luma, kernel, border);
    let stdev = plane_stdev(&response);
    trace!("Edge response stdev: {stdev:.3}");

    if !stdev.is_finite() {
        return Err(ComputeError::NonFinite {
            stage: "edge energy",
        });
    }

    Ok(EdgeResponse { stdev })
}
