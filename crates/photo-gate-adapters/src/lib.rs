//! Photo Gate Adapters - External adapters for photo-gate.
//!
//! This crate provides adapters for:
//! - Filesystem image source

pub mod fs;

pub use fs::FsImageSource;
