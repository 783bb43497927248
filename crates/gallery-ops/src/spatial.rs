//! Blur, sharpen and pixelation.
//!
//! The blurs and sharpen are fixed-kernel specializations of
//! [`crate::convolve`]. Pixelation replicates the centre pixel of each 5x5
//! tile across the tile.
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::spatial::pixelate;
//!
//! let img = PixelBuffer::from_fn(7, 7, |x, y| Rgb::grey((x + y) as i32)).unwrap();
//! let out = pixelate(&img);
//! assert_eq!(out.pixel(0, 0), img.pixel(2, 2));
//! // 7 is not a multiple of 5: the far strip stays black.
//! assert_eq!(out.pixel(6, 6), Rgb::BLACK);
//! ```

use gallery_core::{map, PixelBuffer};
use tracing::trace;

use crate::border::BorderPolicy;
use crate::convolve::convolve_with;
use crate::kernel::{
    Kernel, BOX_5X5, BOX_5X5_DIVISOR, GAUSSIAN_5X5, GAUSSIAN_5X5_DIVISOR, SHARPEN_3X3,
};
use crate::rows::for_each_row;
use crate::OpsResult;

/// Side length of a pixelation tile.
pub const PIXELATE_BLOCK: u32 = 5;

/// 5x5 box blur with zero padding.
pub fn box_blur(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    box_blur_with(src, BorderPolicy::ZeroPad)
}

/// 5x5 box blur under `border`.
pub fn box_blur_with(src: &PixelBuffer, border: BorderPolicy) -> OpsResult<PixelBuffer> {
    convolve_with(src, &BOX_5X5, BOX_5X5_DIVISOR, border)
}

/// 5x5 Gaussian blur with zero padding.
pub fn gaussian_blur(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    gaussian_blur_with(src, BorderPolicy::ZeroPad)
}

/// 5x5 Gaussian blur under `border`.
pub fn gaussian_blur_with(src: &PixelBuffer, border: BorderPolicy) -> OpsResult<PixelBuffer> {
    convolve_with(src, &GAUSSIAN_5X5, GAUSSIAN_5X5_DIVISOR, border)
}

/// 3x3 sharpen with zero padding, clamped to `[0, 255]`.
pub fn sharpen(src: &PixelBuffer) -> OpsResult<PixelBuffer> {
    sharpen_with(src, BorderPolicy::ZeroPad)
}

/// 3x3 sharpen under `border`, clamped to `[0, 255]`.
pub fn sharpen_with(src: &PixelBuffer, border: BorderPolicy) -> OpsResult<PixelBuffer> {
    clamped_convolve(src, &SHARPEN_3X3, border)
}

/// Convolves without normalisation and maps every channel into range.
fn clamped_convolve(src: &PixelBuffer, kernel: &Kernel, border: BorderPolicy) -> OpsResult<PixelBuffer> {
    let mut dst = convolve_with(src, kernel, 1, border)?;
    for px in dst.data_mut() {
        *px = px.map_channels(map);
    }
    Ok(dst)
}

/// Centre sampled for `coord` along an axis of length `len`, if its tile is
/// drawn.
///
/// Tiles start at 0 and step by [`PIXELATE_BLOCK`]. Full tiles sample their
/// middle. A trailing partial tile is drawn only when `partial` is set, and
/// then samples the middle of its in-bounds part.
#[inline]
fn tile_centre(coord: u32, len: u32, partial: bool) -> Option<u32> {
    let origin = coord - coord % PIXELATE_BLOCK;
    let end = (origin + PIXELATE_BLOCK).min(len);
    if end - origin == PIXELATE_BLOCK || partial {
        Some(origin + (end - origin - 1) / 2)
    } else {
        None
    }
}

/// Pixelates with the historical far-edge behaviour.
pub fn pixelate(src: &PixelBuffer) -> PixelBuffer {
    pixelate_with(src, BorderPolicy::LeaveUninitialized)
}

/// Pixelates into 5x5 tiles.
///
/// Each tile takes the colour of its centre pixel. With
/// [`BorderPolicy::SkipAndRenormalize`] trailing partial tiles are filled from
/// the centre of their in-bounds part; any other policy leaves them black.
pub fn pixelate_with(src: &PixelBuffer, border: BorderPolicy) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), block = PIXELATE_BLOCK, %border, "pixelate");

    let partial = border == BorderPolicy::SkipAndRenormalize;
    let (width, height) = src.dimensions();
    let mut dst = src.blank_like();

    for_each_row(dst.data_mut(), width as usize, |y, row| {
        let Some(cy) = tile_centre(y, height, partial) else {
            return;
        };
        let sampled = src.row(cy);
        for (x, out) in row.iter_mut().enumerate() {
            if let Some(cx) = tile_centre(x as u32, width, partial) {
                *out = sampled[cx as usize];
            }
        }
    });
    dst
}

#[cfg(test)]
mod tests {
    use super::*;
    use gallery_core::Rgb;

    fn gradient(w: u32, h: u32) -> PixelBuffer {
        PixelBuffer::from_fn(w, h, |x, y| Rgb::new(x as i32 * 10, y as i32 * 10, 7)).unwrap()
    }

    #[test]
    fn test_single_pixel_filters() {
        let src = PixelBuffer::filled(1, 1, Rgb::new(100, 150, 200)).unwrap();
        assert_eq!(box_blur(&src).unwrap().pixel(0, 0), Rgb::new(4, 6, 8));
        assert_eq!(gaussian_blur(&src).unwrap().pixel(0, 0), Rgb::new(14, 21, 28));
        // Only the centre weight 5 lands, then clamps.
        assert_eq!(sharpen(&src).unwrap().pixel(0, 0), Rgb::WHITE);

        let dim = PixelBuffer::filled(1, 1, Rgb::new(10, 20, 30)).unwrap();
        assert_eq!(sharpen(&dim).unwrap().pixel(0, 0), Rgb::new(50, 100, 150));
        // A lone pixel is not a full tile.
        assert_eq!(pixelate(&dim).pixel(0, 0), Rgb::BLACK);
        assert_eq!(
            pixelate_with(&dim, BorderPolicy::SkipAndRenormalize).pixel(0, 0),
            Rgb::new(10, 20, 30)
        );
    }

    #[test]
    fn test_sharpen_clamps() {
        let mut src = PixelBuffer::new(3, 3).unwrap();
        src.put(1, 1, Rgb::grey(200));
        let out = sharpen(&src).unwrap();
        assert_eq!(out.pixel(1, 1), Rgb::grey(255));
        assert_eq!(out.pixel(1, 0), Rgb::BLACK);
        assert!(out.data().iter().all(|p| p.in_range()));
    }

    #[test]
    fn test_sharpen_twice_flat_interior() {
        let px = Rgb::new(60, 120, 180);
        let src = PixelBuffer::filled(8, 8, px).unwrap();
        let twice = sharpen(&sharpen(&src).unwrap()).unwrap();
        for y in 2..6 {
            for x in 2..6 {
                assert_eq!(twice.pixel(x, y), px);
            }
        }
    }

    #[test]
    fn test_blur_darkens_border() {
        let src = PixelBuffer::filled(10, 10, Rgb::grey(200)).unwrap();
        let out = box_blur(&src).unwrap();
        assert_eq!(out.pixel(5, 5), Rgb::grey(200));
        assert_eq!(out.pixel(0, 5), Rgb::grey(200 * 15 / 25));
        let kept = box_blur_with(&src, BorderPolicy::SkipAndRenormalize).unwrap();
        assert_eq!(kept.pixel(0, 0), Rgb::grey(200));
    }

    #[test]
    fn test_pixelate_tiles() {
        let src = gradient(10, 10);
        let out = pixelate(&src);
        for (x, y, p) in out.pixels() {
            let cx = x / 5 * 5 + 2;
            let cy = y / 5 * 5 + 2;
            assert_eq!(p, src.pixel(cx, cy), "at ({x}, {y})");
        }
    }

    #[test]
    fn test_pixelate_far_strip() {
        let src = gradient(12, 8);
        for border in [BorderPolicy::ZeroPad, BorderPolicy::LeaveUninitialized] {
            let out = pixelate_with(&src, border);
            // Columns 10, 11 and rows 5..8 belong to partial tiles.
            assert_eq!(out.pixel(10, 0), Rgb::BLACK);
            assert_eq!(out.pixel(3, 6), Rgb::BLACK);
            assert_eq!(out.pixel(9, 4), src.pixel(7, 2));
        }
    }

    #[test]
    fn test_pixelate_partial_tiles_filled() {
        let src = gradient(12, 8);
        let out = pixelate_with(&src, BorderPolicy::SkipAndRenormalize);
        // Partial column tile [10, 12) samples x = 10, row tile [5, 8) samples y = 6.
        assert_eq!(out.pixel(11, 0), src.pixel(10, 2));
        assert_eq!(out.pixel(3, 7), src.pixel(2, 6));
        assert_eq!(out.pixel(11, 7), src.pixel(10, 6));
        assert_eq!(out.pixel(0, 0), src.pixel(2, 2));
    }

    #[test]
    fn test_tile_centre() {
        assert_eq!(tile_centre(0, 12, false), Some(2));
        assert_eq!(tile_centre(9, 12, false), Some(7));
        assert_eq!(tile_centre(10, 12, false), None);
        assert_eq!(tile_centre(11, 12, true), Some(10));
        assert_eq!(tile_centre(3, 4, true), Some(1));
    }
}
