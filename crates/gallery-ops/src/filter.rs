//! Named filters with a single dispatch entry point.
//!
//! [`Filter`] names every operation the gallery offers so callers can pick one
//! from a menu or a config string and run it with a shared [`FilterParams`].
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::{Filter, FilterParams};
//!
//! let img = PixelBuffer::filled(4, 4, Rgb::new(10, 20, 30)).unwrap();
//! let filter: Filter = "negative".parse().unwrap();
//! let out = filter.apply(&img, &FilterParams::default()).unwrap();
//! assert_eq!(out.pixel(0, 0), Rgb::new(245, 235, 225));
//! ```

use std::fmt;
use std::str::FromStr;

use gallery_core::PixelBuffer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corner::detect_corners;
use crate::gradient::{prewitt, sobel};
use crate::params::{CornerKind, CornerParams, FilterParams};
use crate::pointwise::{cartoon, contrast, false_colour, greyscale, negative, sepia, threshold};
use crate::spatial::{box_blur_with, gaussian_blur_with, pixelate_with, sharpen_with};
use crate::{OpsError, OpsResult};

/// Every filter operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Filter {
    /// Luma greyscale.
    Greyscale,
    /// Channel inversion.
    Negative,
    /// Sepia tone.
    Sepia,
    /// Four-level posterize.
    Cartoon,
    /// Push away from mid-grey.
    Contrast,
    /// Black and white on a luma cutoff.
    Threshold,
    /// Five-band colour map of luma.
    FalseColour,
    /// 5x5 box blur.
    BoxBlur,
    /// 5x5 Gaussian blur.
    GaussianBlur,
    /// 3x3 sharpen.
    Sharpen,
    /// 5x5 block pixelation.
    Pixelate,
    /// Sobel edge magnitude.
    Sobel,
    /// Prewitt edge magnitude.
    Prewitt,
    /// Harris corners marked on the input.
    Harris,
    /// Shi-Tomasi corners marked on the input.
    ShiTomasi,
}

impl Filter {
    /// All filters in menu order.
    pub const ALL: [Filter; 15] = [
        Filter::Greyscale,
        Filter::Negative,
        Filter::Sepia,
        Filter::Cartoon,
        Filter::Contrast,
        Filter::Threshold,
        Filter::FalseColour,
        Filter::BoxBlur,
        Filter::GaussianBlur,
        Filter::Sharpen,
        Filter::Pixelate,
        Filter::Sobel,
        Filter::Prewitt,
        Filter::Harris,
        Filter::ShiTomasi,
    ];

    /// Short snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Filter::Greyscale => "greyscale",
            Filter::Negative => "negative",
            Filter::Sepia => "sepia",
            Filter::Cartoon => "cartoon",
            Filter::Contrast => "contrast",
            Filter::Threshold => "threshold",
            Filter::FalseColour => "false_colour",
            Filter::BoxBlur => "box_blur",
            Filter::GaussianBlur => "gaussian_blur",
            Filter::Sharpen => "sharpen",
            Filter::Pixelate => "pixelate",
            Filter::Sobel => "sobel",
            Filter::Prewitt => "prewitt",
            Filter::Harris => "harris",
            Filter::ShiTomasi => "shi_tomasi",
        }
    }

    /// Whether the filter reads a neighbourhood rather than single pixels.
    pub fn is_spatial(self) -> bool {
        !matches!(
            self,
            Filter::Greyscale
                | Filter::Negative
                | Filter::Sepia
                | Filter::Cartoon
                | Filter::Contrast
                | Filter::Threshold
                | Filter::FalseColour
        )
    }

    /// Runs the filter on `src`.
    ///
    /// Corner filters greyscale `src` themselves and mark corners on `src`.
    /// The corner kind in `params.corners` is overridden by the variant.
    pub fn apply(&self, src: &PixelBuffer, params: &FilterParams) -> OpsResult<PixelBuffer> {
        debug!(filter = self.name(), width = src.width(), height = src.height(), "apply filter");
        match self {
            Filter::Greyscale => Ok(greyscale(src)),
            Filter::Negative => Ok(negative(src)),
            Filter::Sepia => Ok(sepia(src)),
            Filter::Cartoon => Ok(cartoon(src)),
            Filter::Contrast => Ok(contrast(src, &params.contrast)),
            Filter::Threshold => Ok(threshold(src, &params.threshold)),
            Filter::FalseColour => Ok(false_colour(src)),
            Filter::BoxBlur => box_blur_with(src, params.blur_border),
            Filter::GaussianBlur => gaussian_blur_with(src, params.blur_border),
            Filter::Sharpen => sharpen_with(src, params.blur_border),
            Filter::Pixelate => Ok(pixelate_with(src, params.pixelate_border.0)),
            Filter::Sobel => sobel(src),
            Filter::Prewitt => prewitt(src),
            Filter::Harris => mark_corners(src, params, CornerKind::Harris),
            Filter::ShiTomasi => mark_corners(src, params, CornerKind::ShiTomasi),
        }
    }
}

fn mark_corners(src: &PixelBuffer, params: &FilterParams, kind: CornerKind) -> OpsResult<PixelBuffer> {
    let corners = CornerParams {
        kind,
        ..params.corners
    };
    detect_corners(&greyscale(src), src, &corners)
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Filter {
    type Err = OpsError;

    /// Case-insensitive; `-`, `_` and spaces are ignored. Accepts the
    /// `grayscale` and `false_color` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let filter = match key.as_str() {
            "greyscale" | "grayscale" | "grey" | "gray" => Filter::Greyscale,
            "negative" | "invert" => Filter::Negative,
            "sepia" => Filter::Sepia,
            "cartoon" => Filter::Cartoon,
            "contrast" => Filter::Contrast,
            "threshold" | "binarize" => Filter::Threshold,
            "falsecolour" | "falsecolor" => Filter::FalseColour,
            "boxblur" | "blur" => Filter::BoxBlur,
            "gaussianblur" | "gaussian" => Filter::GaussianBlur,
            "sharpen" => Filter::Sharpen,
            "pixelate" => Filter::Pixelate,
            "sobel" => Filter::Sobel,
            "prewitt" => Filter::Prewitt,
            "harris" => Filter::Harris,
            "shitomasi" => Filter::ShiTomasi,
            _ => return Err(OpsError::InvalidParameter(format!("unknown filter '{s}'"))),
        };
        Ok(filter)
    }
}
