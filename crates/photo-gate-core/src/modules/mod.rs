//! Pipeline stages.
//!
//! Leaf-first: decoding, per-channel statistics, edge energy (built on the
//! generic convolution), scoring and feedback.

pub mod convolution;
pub mod decoder;
pub mod feedback;
pub mod scoring;
pub mod sharpness;
pub mod statistics;

pub use convolution::{convolve, BorderPolicy, Kernel, Plane};
pub use feedback::FeedbackConfig;
pub use scoring::{ScoringConfig, Scores};
pub use statistics::Histogram;
