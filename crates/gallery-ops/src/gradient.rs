//! Sobel and Prewitt gradient operators.
//!
//! Both operators run on a greyscale image and read only its red channel.
//! Kernel sums are raw: no normalisation, zero contribution from taps outside
//! the buffer.
//!
//! Two products come out of here:
//!
//! - **Edge magnitude** ([`edge_magnitude`], [`sobel`], [`prewitt`]):
//!   `map(round(sqrt(Sx^2 + Sy^2)))` written as a greyscale image.
//! - **Partial derivatives** ([`partial_derivatives`]): the Sobel sums
//!   themselves, each clamped to `[0, 255]` and written as greyscale images.
//!   Negative slopes clamp to 0 before the corner detector ever sees them.
//!   That loss is part of the detector's tuned behaviour and is kept.
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::gradient::sobel;
//!
//! let flat = PixelBuffer::filled(8, 8, Rgb::grey(90)).unwrap();
//! let edges = sobel(&flat).unwrap();
//! // Flat interior has no gradient.
//! assert_eq!(edges.pixel(4, 4), Rgb::BLACK);
//! ```

use gallery_core::{map, PixelBuffer, Rgb};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::convolve::convolve_intensity;
use crate::kernel::{Kernel, PREWITT_X, PREWITT_Y, SOBEL_X, SOBEL_Y};
use crate::pointwise::greyscale;
use crate::rows::for_each_row;
use crate::OpsResult;

/// Gradient kernel family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GradientKind {
    /// Sobel, centre-weighted 1-2-1.
    #[default]
    Sobel,
    /// Prewitt, uniform 1-1-1.
    Prewitt,
}

impl GradientKind {
    /// The `(Kx, Ky)` kernel pair.
    pub fn kernels(self) -> (&'static Kernel, &'static Kernel) {
        match self {
            GradientKind::Sobel => (&SOBEL_X, &SOBEL_Y),
            GradientKind::Prewitt => (&PREWITT_X, &PREWITT_Y),
        }
    }
}

/// Raw signed directional sums over a whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientField {
    width: u32,
    height: u32,
    sx: Vec<i32>,
    sy: Vec<i32>,
}

impl GradientField {
    /// Image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(Sx, Sy)` at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> (i32, i32) {
        let idx = y as usize * self.width as usize + x as usize;
        (self.sx[idx], self.sy[idx])
    }

    /// `round(sqrt(Sx^2 + Sy^2))`, unclamped.
    #[inline]
    pub fn magnitude(&self, x: u32, y: u32) -> i32 {
        let (gx, gy) = self.at(x, y);
        let (gx, gy) = (gx as f64, gy as f64);
        (gx * gx + gy * gy).sqrt().round() as i32
    }

    /// Raw `Sx` plane, row-major.
    pub fn sx(&self) -> &[i32] {
        &self.sx
    }

    /// Raw `Sy` plane, row-major.
    pub fn sy(&self) -> &[i32] {
        &self.sy
    }
}

/// Computes raw `(Sx, Sy)` for a greyscale image.
pub fn gradient_sums(grey: &PixelBuffer, kind: GradientKind) -> GradientField {
    trace!(width = grey.width(), height = grey.height(), ?kind, "gradient_sums");
    let (kx, ky) = kind.kernels();
    GradientField {
        width: grey.width(),
        height: grey.height(),
        sx: convolve_intensity(grey, kx),
        sy: convolve_intensity(grey, ky),
    }
}

/// Edge magnitude image.
///
/// Greyscales `src`, computes both directional sums and writes
/// `map(round(sqrt(Sx^2 + Sy^2)))` into R, G and B.
pub fn edge_magnitude(src: &PixelBuffer, kind: GradientKind) -> OpsResult<PixelBuffer> {
    trace!(width = src.width(), height = src.height(), ?kind, "edge_magnitude");
    let grey = greyscale(src);
    let field = gradient_sums(&grey, kind);

    let mut dst = src.blank_like();
    let width = src.width() as usize;
    for_each_row(dst.data_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = Rgb::grey(map(field.magnitude(x as u32, y)));
        }
    });
    Ok(dst)
}

/// Sobel edge detection.
pub fn sobel(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    edge_magnitude(src, GradientKind::Sobel)
}

/// Prewitt edge detection.
pub fn prewitt(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    edge_magnitude(src, GradientKind::Prewitt)
}

/// Writes `map(plane[i])` as a greyscale image shaped like `like`.
fn clamped_plane(like: &PixelBuffer, plane: &[i32]) -> PixelBuffer {
    let mut dst = like.blank_like();
    for (out, &v) in dst.data_mut().iter_mut().zip(plane) {
        *out = Rgb::grey(map(v));
    }
    dst
}

/// Sobel `Ix` of a greyscale image, clamped to `[0, 255]`.
pub fn x_derivative(grey: &PixelBuffer) -> PixelBuffer {
    clamped_plane(grey, &convolve_intensity(grey, &SOBEL_X))
}

/// Sobel `Iy` of a greyscale image, clamped to `[0, 255]`.
pub fn y_derivative(grey: &PixelBuffer) -> PixelBuffer {
    clamped_plane(grey, &convolve_intensity(grey, &SOBEL_Y))
}

/// Sobel `(Ix, Iy)` of a greyscale image, each clamped to `[0, 255]`.
pub fn partial_derivatives(grey: &PixelBuffer) -> (PixelBuffer, PixelBuffer) {
    trace!(width = grey.width(), height = grey.height(), "partial_derivatives");
    let field = gradient_sums(grey, GradientKind::Sobel);
    (clamped_plane(grey, field.sx()), clamped_plane(grey, field.sy()))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Black left half, white right half.
    fn step_image(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, _| if x < w / 2 { Rgb::BLACK } else { Rgb::WHITE }).unwrap()
    }

    #[test]
    fn test_flat_interior_has_no_edges() {
        let img = PixelBuffer::filled(6, 6, Rgb::new(40, 80, 120)).unwrap();
        for kind in [GradientKind::Sobel, GradientKind::Prewitt] {
            let out = edge_magnitude(&img, kind).unwrap();
            for y in 1..5 {
                for x in 1..5 {
                    assert_eq!(out.pixel(x, y), Rgb::BLACK);
                }
            }
        }
    }

    #[test]
    fn test_flat_border_sees_zero_padding() {
        // grey(100) greyscales to 100. At (0, 0) only taps at offsets 0 and +1
        // land, so both Sobel sums are 3 * 100 and the magnitude 424 clamps.
        let img = PixelBuffer::filled(5, 5, Rgb::grey(100)).unwrap();
        let field = gradient_sums(&greyscale(&img), GradientKind::Sobel);
        assert_eq!(field.at(0, 0), (300, 300));
        assert_eq!(field.magnitude(0, 0), 424);
        assert_eq!(sobel(&img).unwrap().pixel(0, 0), Rgb::grey(255));
    }

    #[test]
    fn test_step_edge_detected() {
        let img = step_image(8, 5);
        let out = sobel(&img).unwrap();
        // Columns 3 and 4 straddle the step.
        assert_eq!(out.pixel(3, 2), Rgb::grey(255));
        assert_eq!(out.pixel(4, 2), Rgb::grey(255));
        assert_eq!(out.pixel(1, 2), Rgb::BLACK);
        assert_eq!(out.pixel(6, 2), Rgb::BLACK);
        assert!(out.data().iter().all(|p| p.is_grey() && p.in_range()));
    }

    #[test]
    fn test_magnitude_rounds() {
        // A gentle ramp gives sums that are not perfect squares.
        let img = PixelBuffer::from_fn(5, 5, |x, y| Rgb::grey((x * 3 + y) as i32 + 50)).unwrap();
        let field = gradient_sums(&img, GradientKind::Prewitt);
        let (gx, gy) = field.at(2, 2);
        let exact = ((gx * gx + gy * gy) as f64).sqrt();
        assert_eq!(field.magnitude(2, 2), exact.round() as i32);
    }

    #[test]
    fn test_partial_derivatives_clamp() {
        // Step along x shows up in the Sy plane (first kernel index walks x).
        let grey = step_image(8, 5);
        let field = gradient_sums(&grey, GradientKind::Sobel);
        let (ix, iy) = partial_derivatives(&grey);
        assert_eq!(field.at(3, 2).1, 1020);
        assert_eq!(iy.pixel(3, 2), Rgb::grey(255));
        assert_eq!(ix.pixel(3, 2), Rgb::grey(0));
        assert!(ix.data().iter().chain(iy.data()).all(|p| p.in_range() && p.is_grey()));
    }

    #[test]
    fn test_single_derivatives_match_pair() {
        let grey = greyscale(&PixelBuffer::from_fn(7, 6, |x, y| Rgb::grey(((x * y * 37) % 256) as i32)).unwrap());
        let (ix, iy) = partial_derivatives(&grey);
        assert_eq!(x_derivative(&grey), ix);
        assert_eq!(y_derivative(&grey), iy);
    }

    #[test]
    fn test_single_pixel() {
        let img = PixelBuffer::filled(1, 1, Rgb::WHITE).unwrap();
        // Every kernel has a zero centre weight, so a lone pixel has no gradient.
        assert_eq!(sobel(&img).unwrap().pixel(0, 0), Rgb::BLACK);
        assert_eq!(prewitt(&img).unwrap().pixel(0, 0), Rgb::BLACK);
    }
}
