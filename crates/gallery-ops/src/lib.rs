//! # gallery-ops
//!
//! Image filters for the gallery pixel engine.
//!
//! Every operation takes a borrowed [`PixelBuffer`](gallery_core::PixelBuffer)
//! and returns a freshly allocated one of the same size. Inputs are never
//! mutated.
//!
//! # Modules
//!
//! - [`convolve`] - Integer kernel convolution with a [`BorderPolicy`]
//! - [`kernel`] - [`Kernel`] type and the named kernels
//! - [`pointwise`] - Greyscale, negative, sepia, cartoon, contrast, threshold, false colour
//! - [`spatial`] - Box and Gaussian blur, sharpen, pixelate
//! - [`gradient`] - Sobel and Prewitt edge magnitude, partial derivatives
//! - [`corner`] - Harris and Shi-Tomasi corner detection
//! - [`params`] - Tunable thresholds and policies
//! - [`filter`] - [`Filter`] enum dispatching to all of the above
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::{pointwise, spatial};
//!
//! let img = PixelBuffer::filled(16, 16, Rgb::new(120, 80, 200)).unwrap();
//! let blurred = spatial::gaussian_blur(&img).unwrap();
//! let grey = pointwise::greyscale(&blurred);
//! assert!(grey.data().iter().all(|p| p.is_grey()));
//! ```
//!
//! ## Corner detection
//!
//! ```rust,ignore
//! use gallery_ops::corner::CornerDetector;
//! use gallery_ops::params::{CornerKind, CornerParams};
//!
//! let detector = CornerDetector::new(CornerParams::with_kind(CornerKind::ShiTomasi))?;
//! let marked = detector.detect(&greyscale(&photo), &photo)?;
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - Row-parallel execution via Rayon
//! - `serde` - Serialization for parameters, policies and [`Filter`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod rows;

pub mod border;
pub mod convolve;
pub mod corner;
pub mod filter;
pub mod gradient;
pub mod kernel;
pub mod params;
pub mod pointwise;
pub mod spatial;

pub use border::BorderPolicy;
pub use corner::{Corner, CornerDetector, StructureTensor};
pub use error::{OpsError, OpsResult};
pub use filter::Filter;
pub use gradient::GradientKind;
pub use kernel::Kernel;
pub use params::{ContrastParams, CornerKind, CornerParams, FilterParams, ThresholdParams};
