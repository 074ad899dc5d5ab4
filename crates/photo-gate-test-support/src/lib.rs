//! Test support utilities for photo-gate.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the photo-gate scoring pipeline.
//!
//! # Example
//!
//! ```
//! use photo_gate_test_support::{MockImageSource, SyntheticImageBuilder};
//!
//! // Create synthetic test images
//! let sharp = SyntheticImageBuilder::checkerboard(128, 128);
//! let flat = SyntheticImageBuilder::uniform_gray(128, 128, 128);
//!
//! // Create mock image source
//! let source = MockImageSource::new(vec![sharp.to_image_bytes(), flat.to_image_bytes()]);
//! ```

mod builders;
mod mocks;

pub use builders::{SyntheticImage, SyntheticImageBuilder};
pub use mocks::{MockImageSource, MockProgressSink, MockResultOutput};
