//! Integer convolution kernels.
//!
//! A [`Kernel`] is a square matrix of integer weights with an odd side length.
//! Weights are indexed `(i, j)` where `i` walks the **x** offset and `j` the
//! **y** offset: `weight(i, j)` multiplies the source pixel at
//! `(x - r + i, y - r + j)`, with `r = (size - 1) / 2`.
//!
//! For symmetric kernels (blurs, sharpen) the orientation is irrelevant. For
//! the gradient pairs it means the literal row `[-1, 0, 1]` of [`SOBEL_X`]
//! is the column of taps at `x - 1`.
//!
//! # Kernels
//!
//! - [`BOX_5X5`] - all-ones average, divide by 25
//! - [`GAUSSIAN_5X5`] - binomial approximation, divide by 256
//! - [`SHARPEN_3X3`] - centre 5, cross -1, weights sum to 1
//! - [`SOBEL_X`], [`SOBEL_Y`], [`PREWITT_X`], [`PREWITT_Y`] - gradient pairs
//!
//! # Example
//!
//! ```rust
//! use gallery_ops::kernel::{Kernel, GAUSSIAN_5X5};
//!
//! assert_eq!(GAUSSIAN_5X5.radius(), 2);
//! assert_eq!(GAUSSIAN_5X5.sum(), 256);
//!
//! let k = Kernel::new(3, vec![1; 9]).unwrap();
//! assert_eq!(k.weight(2, 2), 1);
//! ```

use std::borrow::Cow;

use crate::{OpsError, OpsResult};

/// Square integer convolution kernel with odd side length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    size: usize,
    weights: Cow<'static, [i32]>,
}

impl Kernel {
    /// Creates a kernel from `size * size` weights, laid out `weights[i * size + j]`.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] if `size` is zero or even, or the weight
    /// count doesn't match.
    pub fn new(size: usize, weights: Vec<i32>) -> OpsResult<Self> {
        if size == 0 || size % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "side length must be odd and positive, got {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(OpsError::InvalidKernel(format!(
                "kernel data size {} doesn't match {}x{}",
                weights.len(),
                size,
                size
            )));
        }
        Ok(Self {
            size,
            weights: Cow::Owned(weights),
        })
    }

    /// Creates a kernel from a static weight table. Usable in `static` items.
    ///
    /// # Panics
    ///
    /// Panics (at compile time in a `static`) on an even side or wrong length.
    pub const fn from_static(size: usize, weights: &'static [i32]) -> Self {
        assert!(size % 2 == 1, "kernel side length must be odd");
        assert!(weights.len() == size * size, "kernel weight count mismatch");
        Self {
            size,
            weights: Cow::Borrowed(weights),
        }
    }

    /// Side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Neighbourhood radius `(size - 1) / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        (self.size - 1) / 2
    }

    /// Weight applied to tap `(x - r + i, y - r + j)`.
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> i32 {
        self.weights[i * self.size + j]
    }

    /// All weights, `i`-major.
    #[inline]
    pub fn weights(&self) -> &[i32] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn sum(&self) -> i64 {
        self.weights.iter().map(|&w| w as i64).sum()
    }
}

/// 5x5 all-ones box kernel.
pub static BOX_5X5: Kernel = Kernel::from_static(
    5,
    &[
        1, 1, 1, 1, 1,
        1, 1, 1, 1, 1,
        1, 1, 1, 1, 1,
        1, 1, 1, 1, 1,
        1, 1, 1, 1, 1,
    ],
);

/// Divisor for [`BOX_5X5`].
pub const BOX_5X5_DIVISOR: i32 = 25;

/// 5x5 binomial Gaussian approximation.
pub static GAUSSIAN_5X5: Kernel = Kernel::from_static(
    5,
    &[
        1, 4, 6, 4, 1,
        4, 16, 24, 16, 4,
        6, 24, 36, 24, 6,
        4, 16, 24, 16, 4,
        1, 4, 6, 4, 1,
    ],
);

/// Divisor for [`GAUSSIAN_5X5`].
pub const GAUSSIAN_5X5_DIVISOR: i32 = 256;

/// 3x3 sharpening kernel. Weights sum to 1.
pub static SHARPEN_3X3: Kernel = Kernel::from_static(
    3,
    &[
        0, -1, 0,
        -1, 5, -1,
        0, -1, 0,
    ],
);

/// Sobel kernel paired with `Ix`.
pub static SOBEL_X: Kernel = Kernel::from_static(
    3,
    &[
        -1, 0, 1,
        -2, 0, 2,
        -1, 0, 1,
    ],
);

/// Sobel kernel paired with `Iy`.
pub static SOBEL_Y: Kernel = Kernel::from_static(
    3,
    &[
        -1, -2, -1,
        0, 0, 0,
        1, 2, 1,
    ],
);

/// Prewitt kernel paired with `Ix`.
pub static PREWITT_X: Kernel = Kernel::from_static(
    3,
    &[
        1, 0, -1,
        1, 0, -1,
        1, 0, -1,
    ],
);

/// Prewitt kernel paired with `Iy`.
pub static PREWITT_Y: Kernel = Kernel::from_static(
    3,
    &[
        1, 1, 1,
        0, 0, 0,
        -1, -1, -1,
    ],
);
