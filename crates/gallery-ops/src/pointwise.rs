//! Per-pixel, kernel-free transforms.
//!
//! Every filter here maps each pixel independently, so all of them go through
//! [`map_pixels`], which fills a fresh buffer row by row.
//!
//! - [`greyscale`] - `floor(0.3R + 0.6G + 0.1B)`
//! - [`negative`] - `255 - c`
//! - [`sepia`] - classic sepia matrix, upper-clamped
//! - [`cartoon`] - per-channel [`quantize`] to four levels
//! - [`contrast`] - push pixels away from a mid-grey pivot
//! - [`threshold`] - binarize on the greyscale value
//! - [`false_colour`] - five-band colour map of greyscale intensity
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::pointwise::{greyscale, negative};
//!
//! let img = PixelBuffer::filled(2, 2, Rgb::new(100, 150, 200)).unwrap();
//! assert_eq!(greyscale(&img).pixel(0, 0), Rgb::grey(140));
//! assert_eq!(negative(&negative(&img)), img);
//! ```

use gallery_core::{Channel, PixelBuffer, Rgb, CHANNEL_MAX, CHANNEL_MIN};
use tracing::trace;

use crate::params::{ContrastParams, ThresholdParams};
use crate::rows::for_each_row;

/// Applies `f` to every pixel of `src`, producing a new buffer.
pub fn map_pixels<F>(src: &PixelBuffer, f: F) -> PixelBuffer
where
    F: Fn(Rgb) -> Rgb + Sync + Send,
{
    let mut dst = src.blank_like();
    let width = src.width() as usize;
    for_each_row(dst.data_mut(), width, |y, row| {
        for (out, &px) in row.iter_mut().zip(src.row(y)) {
            *out = f(px);
        }
    });
    dst
}

/// Greyscale value of a pixel, truncated.
#[inline]
pub fn luma(px: Rgb) -> Channel {
    (0.3 * px.r as f64 + 0.6 * px.g as f64 + 0.1 * px.b as f64) as Channel
}

/// Converts to greyscale; every output pixel has R = G = B.
pub fn greyscale(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "greyscale");
    map_pixels(src, |px| Rgb::grey(luma(px)))
}

/// Inverts every channel. Applying it twice returns the input.
pub fn negative(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "negative");
    map_pixels(src, |px| px.map_channels(|c| CHANNEL_MAX - c))
}

/// Sepia tone of a single pixel.
#[inline]
pub fn sepia_pixel(px: Rgb) -> Rgb {
    let (r, g, b) = (px.r as f64, px.g as f64, px.b as f64);
    let tone = |v: f64| (v as Channel).min(CHANNEL_MAX);
    Rgb::new(
        tone(0.393 * r + 0.769 * g + 0.189 * b),
        tone(0.349 * r + 0.686 * g + 0.168 * b),
        tone(0.272 * r + 0.534 * g + 0.131 * b),
    )
}

/// Applies the sepia matrix. Channels are clamped to 255 and truncated.
pub fn sepia(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "sepia");
    map_pixels(src, sepia_pixel)
}

/// Snaps a channel to one of `{0, 85, 170, 255}`.
///
/// Only an exact 255 maps to 255.
///
/// ```rust
/// use gallery_ops::pointwise::quantize;
///
/// assert_eq!(quantize(84), 0);
/// assert_eq!(quantize(169), 85);
/// assert_eq!(quantize(254), 170);
/// assert_eq!(quantize(255), 255);
/// ```
#[inline]
pub fn quantize(n: Channel) -> Channel {
    if n < 85 {
        0
    } else if n < 170 {
        85
    } else if n < 255 {
        170
    } else {
        255
    }
}

/// Cartoon effect: quantizes every channel independently.
pub fn cartoon(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "cartoon");
    map_pixels(src, |px| px.map_channels(quantize))
}

/// Contrast enhancement with the default pivot 127 and step 50.
pub fn contrast_enhance(src: &PixelBuffer) -> PixelBuffer {
    contrast(src, &ContrastParams::default())
}

/// Contrast enhancement.
///
/// The channel average `floor((R + G + B) / 3)` is compared with
/// `params.pivot`. Strictly above it every channel gains `params.step`
/// (capped at 255); otherwise every channel loses it (floored at 0).
pub fn contrast(src: &PixelBuffer, params: &ContrastParams) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), pivot = params.pivot, step = params.step, "contrast");
    let (pivot, step) = (params.pivot, params.step);
    map_pixels(src, move |px| {
        let average = (px.r + px.g + px.b) / 3;
        if average > pivot {
            px.map_channels(|c| (c + step).min(CHANNEL_MAX))
        } else {
            px.map_channels(|c| (c - step).max(CHANNEL_MIN))
        }
    })
}

/// Binarize with the default cutoff 127.
pub fn binarize(src: &PixelBuffer) -> PixelBuffer {
    threshold(src, &ThresholdParams::default())
}

/// Binarize: white where the greyscale value is at least `params.cutoff`,
/// black elsewhere.
pub fn threshold(src: &PixelBuffer, params: &ThresholdParams) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), cutoff = params.cutoff, "threshold");
    let cutoff = params.cutoff;
    map_pixels(src, move |px| {
        if luma(px) >= cutoff {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    })
}

/// Navy band, intensity in `[0, 0.25)`.
pub const FALSE_COLOUR_NAVY: Rgb = Rgb::new(0, 0, 128);
/// Green band, intensity in `[0.25, 0.5)`.
pub const FALSE_COLOUR_GREEN: Rgb = Rgb::new(0, 255, 0);
/// Yellow band, intensity in `[0.5, 0.75)`.
pub const FALSE_COLOUR_YELLOW: Rgb = Rgb::new(255, 255, 0);
/// Orange band, intensity in `[0.75, 1.0)`.
pub const FALSE_COLOUR_ORANGE: Rgb = Rgb::new(255, 128, 0);
/// Red band, intensity exactly 1.0.
pub const FALSE_COLOUR_RED: Rgb = Rgb::new(255, 0, 0);

/// Colour-map value of a greyscale intensity.
pub fn false_colour_value(intensity: Channel) -> Rgb {
    let t = intensity as f64 / 255.0;
    if t < 0.25 {
        FALSE_COLOUR_NAVY
    } else if t < 0.5 {
        FALSE_COLOUR_GREEN
    } else if t < 0.75 {
        FALSE_COLOUR_YELLOW
    } else if t < 1.0 {
        FALSE_COLOUR_ORANGE
    } else {
        FALSE_COLOUR_RED
    }
}

/// False-colour map. Input is assumed greyscale; only red is read.
pub fn false_colour(src: &PixelBuffer) -> PixelBuffer {
    trace!(width = src.width(), height = src.height(), "false_colour");
    map_pixels(src, |px| false_colour_value(px.r))
}
