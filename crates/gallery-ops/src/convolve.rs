//! 2D discrete convolution with integer kernels.
//!
//! For each output pixel (x, y) the engine sums, per channel,
//! `kernel.weight(i, j) * src(x - r + i, y - r + j)` over the footprint and
//! divides the sum by a fixed `normalize_by`. Division truncates toward zero.
//!
//! Taps falling outside the buffer are handled by a [`BorderPolicy`]. The
//! default, [`BorderPolicy::ZeroPad`], drops them from the sum but still
//! divides by the full `normalize_by`, so box and Gaussian blurs darken
//! toward the edges. That is the gallery's established output.
//!
//! The engine never clamps. Callers with signed kernels (sharpen, gradients)
//! pass the result through [`gallery_core::map`].
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::convolve::convolve;
//! use gallery_ops::kernel::{BOX_5X5, BOX_5X5_DIVISOR};
//!
//! let src = PixelBuffer::filled(1, 1, Rgb::new(100, 150, 200)).unwrap();
//! let out = convolve(&src, &BOX_5X5, BOX_5X5_DIVISOR).unwrap();
//! // 24 of 25 taps fall outside the 1x1 buffer.
//! assert_eq!(out.pixel(0, 0), Rgb::new(4, 6, 8));
//! ```

use gallery_core::{Channel, PixelBuffer, Rgb};
use tracing::trace;

use crate::border::BorderPolicy;
use crate::kernel::Kernel;
use crate::rows::for_each_row;
use crate::{OpsError, OpsResult};

/// Raw accumulation of one footprint.
#[derive(Debug, Clone, Copy, Default)]
struct Footprint {
    /// Per-channel weighted sums over in-bounds taps.
    sums: [i64; 3],
    /// Sum of the weights whose taps landed inside the buffer.
    weight_in_bounds: i64,
    /// At least one tap fell outside the buffer.
    clipped: bool,
}

/// Accumulates the kernel footprint centred at (x, y).
#[inline]
fn accumulate(src: &PixelBuffer, kernel: &Kernel, x: u32, y: u32) -> Footprint {
    let r = kernel.radius() as i64;
    let mut fp = Footprint::default();

    for i in 0..kernel.size() {
        let sx = x as i64 - r + i as i64;
        for j in 0..kernel.size() {
            let sy = y as i64 - r + j as i64;
            if !src.contains(sx, sy) {
                fp.clipped = true;
                continue;
            }
            let w = kernel.weight(i, j) as i64;
            let px = src.pixel(sx as u32, sy as u32);
            fp.sums[0] += w * px.r as i64;
            fp.sums[1] += w * px.g as i64;
            fp.sums[2] += w * px.b as i64;
            fp.weight_in_bounds += w;
        }
    }
    fp
}

/// Convolves `src` with `kernel`, dividing by `normalize_by`, using
/// [`BorderPolicy::ZeroPad`].
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `normalize_by` is zero.
pub fn convolve(src: &PixelBuffer, kernel: &Kernel, normalize_by: i32) -> OpsResult<PixelBuffer> {
    convolve_with(src, kernel, normalize_by, BorderPolicy::ZeroPad)
}

/// Convolves `src` with `kernel` under an explicit border policy.
///
/// - `ZeroPad`: `sum / normalize_by`.
/// - `SkipAndRenormalize`: `sum * kernel.sum() / (in_bounds_weight * normalize_by)`
///   when both weight sums are non-zero, otherwise as `ZeroPad`. For the box
///   blur this is the mean of the in-bounds taps.
/// - `LeaveUninitialized`: clipped pixels stay black.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `normalize_by` is zero.
pub fn convolve_with(
    src: &PixelBuffer,
    kernel: &Kernel,
    normalize_by: i32,
    border: BorderPolicy,
) -> OpsResult<PixelBuffer> {
    trace!(
        width = src.width(),
        height = src.height(),
        kernel = kernel.size(),
        normalize_by,
        %border,
        "convolve"
    );

    if normalize_by == 0 {
        return Err(OpsError::InvalidParameter("normalize_by must be non-zero".into()));
    }

    let total_weight = kernel.sum();
    let divisor = normalize_by as i64;
    let mut dst = src.blank_like();
    let width = src.width() as usize;

    for_each_row(dst.data_mut(), width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let fp = accumulate(src, kernel, x as u32, y);

            let sums = match border {
                BorderPolicy::LeaveUninitialized if fp.clipped => continue,
                BorderPolicy::SkipAndRenormalize
                    if fp.clipped && fp.weight_in_bounds != 0 && total_weight != 0 =>
                {
                    let denom = fp.weight_in_bounds * divisor;
                    fp.sums.map(|s| s * total_weight / denom)
                }
                _ => fp.sums.map(|s| s / divisor),
            };

            *out = Rgb::new(sums[0] as Channel, sums[1] as Channel, sums[2] as Channel);
        }
    });

    Ok(dst)
}

/// Convolves the red channel of `src` with `kernel`, returning raw signed sums.
///
/// No normalisation and no clamping. Out-of-bounds taps contribute zero. Used
/// by the gradient operators on greyscale input, where R = G = B.
pub fn convolve_intensity(src: &PixelBuffer, kernel: &Kernel) -> Vec<i32> {
    trace!(width = src.width(), height = src.height(), kernel = kernel.size(), "convolve_intensity");

    let r = kernel.radius() as i64;
    let width = src.width() as usize;
    let mut dst = vec![0i32; src.pixel_count()];

    for_each_row(&mut dst, width, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0i64;
            for i in 0..kernel.size() {
                let sx = x as i64 - r + i as i64;
                for j in 0..kernel.size() {
                    let sy = y as i64 - r + j as i64;
                    if src.contains(sx, sy) {
                        sum += kernel.weight(i, j) as i64
                            * src.intensity(sx as u32, sy as u32) as i64;
                    }
                }
            }
            *out = sum as i32;
        }
    });

    dst
}
