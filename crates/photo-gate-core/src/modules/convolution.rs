//! Generic 2D kernel convolution over single-channel planes.

/// Single-channel floating point image, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl Plane {
    /// Builds a plane by evaluating `f` at every coordinate.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    /// Plane filled with a constant value.
    #[must_use]
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    /// Width in samples.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Row-major values.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the plane.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Odd-sized convolution kernel, anchored at its center.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Creates a kernel from row-major weights.
    ///
    /// Returns `None` unless both sides are odd and `weights` holds exactly
    /// `width * height` values.
    #[must_use]
    pub fn new(width: usize, height: usize, weights: Vec<f32>) -> Option<Self> {
        if width % 2 == 0 || height % 2 == 0 || weights.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            weights,
        })
    }

    /// 3x3 kernel from a row-major array.
    #[must_use]
    pub fn square3(weights: [f32; 9]) -> Self {
        Self {
            width: 3,
            height: 3,
            weights: weights.to_vec(),
        }
    }

    /// 8-neighbour discrete Laplacian. Sums to zero, so it is a pure high-pass.
    #[must_use]
    pub fn laplacian() -> Self {
        Self::square3([-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0])
    }

    /// Sum of all weights.
    #[must_use]
    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Kernel width.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Kernel height.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }
}

/// How samples outside the plane are read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderPolicy {
    /// Clamp coordinates to the nearest edge pixel.
    Replicate,
    /// Treat outside samples as a fixed value.
    Constant(f32),
}

/// Convolves `plane` with `kernel`; the output has the input's dimensions.
///
/// Accumulation is done in `f64`, so zero-sum kernels give exactly zero on
/// flat regions.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn convolve(plane: &Plane, kernel: &Kernel, border: BorderPolicy) -> Plane {
    let (width, height) = (plane.width as i64, plane.height as i64);
    let cx = (kernel.width / 2) as i64;
    let cy = (kernel.height / 2) as i64;

    let sample = |x: i64, y: i64| -> f64 {
        if (0..width).contains(&x) && (0..height).contains(&y) {
            return f64::from(plane.values[(y * width + x) as usize]);
        }
        match border {
            BorderPolicy::Replicate => {
                let x = x.clamp(0, width - 1);
                let y = y.clamp(0, height - 1);
                f64::from(plane.values[(y * width + x) as usize])
            }
            BorderPolicy::Constant(value) => f64::from(value),
        }
    };

    Plane::from_fn(plane.width, plane.height, |x, y| {
        let (x, y) = (i64::from(x), i64::from(y));
        let mut acc = 0.0f64;
        for ky in 0..kernel.height {
            for kx in 0..kernel.width {
                let weight = kernel.weights[ky * kernel.width + kx];
                if weight == 0.0 {
                    continue;
                }
                // Flipped taps: true convolution rather than correlation.
                let sx = x - (kx as i64 - cx);
                let sy = y - (ky as i64 - cy);
                acc += f64::from(weight) * sample(sx, sy);
            }
        }
        acc as f32
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_rejects_even_sides() {
        assert!(Kernel::new(2, 3, vec![0.0; 6]).is_none());
        assert!(Kernel::new(3, 3, vec![0.0; 8]).is_none());
        assert!(Kernel::new(5, 1, vec![0.2; 5]).is_some());
    }

    #[test]
    fn test_laplacian_sums_to_zero() {
        assert_eq!(Kernel::laplacian().sum(), 0.0);
    }

    #[test]
    fn test_flat_plane_gives_zero_response() {
        let plane = Plane::filled(7, 5, 128.0);
        let response = convolve(&plane, &Kernel::laplacian(), BorderPolicy::Replicate);

        assert_eq!(response.width(), 7);
        assert_eq!(response.height(), 5);
        assert!(response.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_constant_border_creates_edge_response() {
        let plane = Plane::filled(3, 3, 10.0);
        let response = convolve(&plane, &Kernel::laplacian(), BorderPolicy::Constant(0.0));

        // Center sees only in-bounds neighbours.
        assert_eq!(response.get(1, 1), 0.0);
        // Corner has 5 of its 8 neighbours outside: 8*10 - 3*10.
        assert_eq!(response.get(0, 0), 50.0);
    }

    #[test]
    fn test_single_impulse() {
        let plane = Plane::from_fn(5, 5, |x, y| if x == 2 && y == 2 { 1.0 } else { 0.0 });
        let response = convolve(&plane, &Kernel::laplacian(), BorderPolicy::Replicate);

        assert_eq!(response.get(2, 2), 8.0);
        assert_eq!(response.get(1, 1), -1.0);
        assert_eq!(response.get(3, 2), -1.0);
        assert_eq!(response.get(0, 0), 0.0);
        assert_eq!(response.values().iter().sum::<f32>(), 0.0);
    }

    #[test]
    fn test_kernel_is_flipped() {
        // Weight on the left tap picks up the right neighbour.
        let kernel = Kernel::square3([0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        let plane = Plane::from_fn(4, 1, |x, _| x as f32);
        let response = convolve(&plane, &kernel, BorderPolicy::Replicate);

        assert_eq!(response.values(), &[1.0, 2.0, 3.0, 3.0]);
    }

    #[test]
    fn test_identity_kernel_preserves_plane() {
        let kernel = Kernel::square3([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
        let plane = Plane::from_fn(6, 4, |x, y| (x * 10 + y) as f32);
        let response = convolve(&plane, &kernel, BorderPolicy::Constant(99.0));

        assert_eq!(response, plane);
    }

    #[test]
    fn test_replicate_on_single_pixel() {
        let plane = Plane::filled(1, 1, 42.0);
        let response = convolve(&plane, &Kernel::laplacian(), BorderPolicy::Replicate);
        assert_eq!(response.values(), &[0.0]);
    }
}
