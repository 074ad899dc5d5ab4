//! Synthetic image builders for testing.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use photo_gate_core::ImageBytes;

/// A generated test image.
#[derive(Debug, Clone)]
pub struct SyntheticImage {
    /// Identifier, also used as the file stem when saved.
    pub name: &'static str,
    /// Decoded pixels.
    pub image: DynamicImage,
}

impl SyntheticImage {
    const fn new(name: &'static str, image: DynamicImage) -> Self {
        Self { name, image }
    }

    /// Image width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encodes the image in `format`.
    ///
    /// # Panics
    ///
    /// Panics if the encoder rejects the image.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn encode(&self, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, format)
            .expect("synthetic image should encode");
        buf.into_inner()
    }

    /// Lossless PNG encoding.
    #[must_use]
    pub fn png_bytes(&self) -> Vec<u8> {
        self.encode(ImageFormat::Png)
    }

    /// PNG-encoded payload tagged `synthetic://<name>`.
    #[must_use]
    pub fn to_image_bytes(&self) -> ImageBytes {
        ImageBytes::new(format!("synthetic://{}", self.name), self.png_bytes())
    }

    /// Writes `<dir>/<name>.png` and returns its path.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    #[allow(clippy::expect_used)]
    pub fn save_png(&self, dir: &Path) -> PathBuf {
        let path = dir.join(format!("{}.png", self.name));
        std::fs::write(&path, self.png_bytes()).expect("write synthetic png");
        path
    }
}

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images with specific
/// characteristics (sharp, blurry, underexposed, etc.).
pub struct SyntheticImageBuilder;

impl SyntheticImageBuilder {
    // === Sharp/High-Contrast Images ===

    /// Creates a high-contrast checkerboard pattern (very sharp edges).
    ///
    /// Mean 127.5 and full contrast: scores 85 and passes with defaults.
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> SyntheticImage {
        Self::checkerboard_with_cell_size(width, height, 8)
    }

    /// Creates a checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> SyntheticImage {
        let cell_size = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        SyntheticImage::new("checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Creates vertical bars pattern (sharp edges).
    #[must_use]
    pub fn vertical_bars(width: u32, height: u32, bar_width: u32) -> SyntheticImage {
        let bar_width = bar_width.max(1);
        let img = GrayImage::from_fn(width, height, |x, _| {
            if (x / bar_width) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        SyntheticImage::new("vertical_bars", DynamicImage::ImageLuma8(img))
    }

    // === Soft Images ===

    /// Creates a uniform gray image (no edges, no contrast).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> SyntheticImage {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        SyntheticImage::new("uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a smooth horizontal gradient (contrast without edges).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn horizontal_gradient(width: u32, height: u32) -> SyntheticImage {
        let img = GrayImage::from_fn(width, height, |x, _| {
            let val = ((u32::from(u8::MAX) * x) / width.max(1)) as u8;
            Luma([val])
        });
        SyntheticImage::new("horizontal_gradient", DynamicImage::ImageLuma8(img))
    }

    // === Exposure Images ===

    /// Creates a completely black image (severely underexposed).
    #[must_use]
    pub fn underexposed(width: u32, height: u32) -> SyntheticImage {
        SyntheticImage::new("underexposed", Self::rgb(width, height, [0, 0, 0]))
    }

    /// Creates a completely white image (severely overexposed).
    #[must_use]
    pub fn overexposed(width: u32, height: u32) -> SyntheticImage {
        SyntheticImage::new("overexposed", Self::rgb(width, height, [255, 255, 255]))
    }

    /// Creates a uniform mid-gray RGB image (R=G=B=128).
    #[must_use]
    pub fn mid_gray(width: u32, height: u32) -> SyntheticImage {
        SyntheticImage::new("mid_gray", Self::rgb(width, height, [128, 128, 128]))
    }

    /// Creates a uniform RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> SyntheticImage {
        SyntheticImage::new("rgb_uniform", Self::rgb(width, height, [r, g, b]))
    }

    // === Special Test Images ===

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> SyntheticImage {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        SyntheticImage::new("single_pixel", DynamicImage::ImageLuma8(img))
    }

    /// Bytes that no decoder accepts.
    #[must_use]
    pub fn corrupt_bytes() -> ImageBytes {
        ImageBytes::new("synthetic://corrupt", b"\x89PNG\r\n\x1a\ntruncated".to_vec())
    }

    fn rgb(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |_, _| Rgb(color)))
    }
}
