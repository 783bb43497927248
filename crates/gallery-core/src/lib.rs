//! # gallery-core
//!
//! Core types for the gallery pixel engine.
//!
//! This crate provides the foundational types every filter works with:
//!
//! - [`PixelBuffer`] - Owned width x height grid of RGB triples
//! - [`Rgb`] - A single pixel with integer channels
//! - [`Error`] - Construction and bounds errors
//!
//! ## Crate Structure
//!
//! This crate is the foundation of the workspace and has no internal dependencies:
//!
//! ```text
//! gallery-core (this crate)
//!    ^
//!    |
//!    +-- gallery-ops (convolution, point-wise filters, gradients, corners)
//!    +-- gallery-tests (integration tests)
//!    +-- gallery-bench (criterion benchmarks)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//!
//! let mut img = PixelBuffer::new(4, 4).unwrap();
//! img.set(1, 2, Rgb::new(10, 20, 30)).unwrap();
//! assert_eq!(img.get(1, 2).unwrap(), Rgb::new(10, 20, 30));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization for [`Rgb`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use pixel::{map, Channel, Rgb, CHANNEL_MAX, CHANNEL_MIN};

/// Prelude module for convenient imports.
///
/// ```
/// use gallery_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{map, Channel, Rgb};
}
