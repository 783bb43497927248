//! Harris and Shi-Tomasi corner detection.
//!
//! Algorithm:
//!   1. Sobel partial derivatives `Ix`, `Iy` of the greyscale image, each
//!      clamped to `[0, 255]` (see [`crate::gradient::partial_derivatives`])
//!   2. For every pixel at least `margin` away from each edge, integer means of
//!      `Ix`, `Iy`, `Ix^2`, `Iy^2` over the fixed 3x3 window around it
//!   3. Structure tensor: `det = <Ix^2><Iy^2> - (<Ix><Iy>)^2`,
//!      `trace = <Ix^2> + <Iy^2>`
//!   4. Score with Harris `det - k * trace^2` or Shi-Tomasi `min(e1, e2)`
//!   5. Paint a square on every pixel scoring strictly above the threshold;
//!      copy the original colour through everywhere else
//!
//! Scoring is row-parallel. Painting is not: squares overlap and later
//! non-corner pixels overwrite earlier squares, so it runs in one fixed order
//! (x outer, y inner) to keep the output deterministic.
//!
//! The margin is never visited. With the default
//! [`BorderPolicy::LeaveUninitialized`] it stays black; corner squares near
//! the margin still paint into it.
//!
//! # Example
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//! use gallery_ops::corner::detect_harris_corners;
//! use gallery_ops::pointwise::greyscale;
//!
//! let original = PixelBuffer::new(10, 10).unwrap();
//! let marked = detect_harris_corners(&greyscale(&original), &original).unwrap();
//! assert!(marked.data().iter().all(|&p| p == Rgb::BLACK));
//! ```

use gallery_core::{PixelBuffer, Rgb};
use tracing::{debug, trace};

use crate::border::BorderPolicy;
use crate::gradient::partial_derivatives;
use crate::params::{CornerKind, CornerParams};
use crate::rows::for_each_row;
use crate::{OpsError, OpsResult};

/// Window means of the clamped gradients around one pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructureTensor {
    /// Mean of `Ix`.
    pub mean_ix: i64,
    /// Mean of `Iy`.
    pub mean_iy: i64,
    /// Mean of `Ix^2`.
    pub mean_ix2: i64,
    /// Mean of `Iy^2`.
    pub mean_iy2: i64,
}

impl StructureTensor {
    /// Accumulates the 3x3 window centred at (x, y). Means truncate.
    ///
    /// # Panics
    ///
    /// Panics if the window leaves either buffer.
    pub fn from_window(ix: &PixelBuffer, iy: &PixelBuffer, x: u32, y: u32) -> Self {
        let mut sums = [0i64; 4];
        for wy in y - 1..=y + 1 {
            for wx in x - 1..=x + 1 {
                let gx = ix.intensity(wx, wy) as i64;
                let gy = iy.intensity(wx, wy) as i64;
                sums[0] += gx;
                sums[1] += gy;
                sums[2] += gx * gx;
                sums[3] += gy * gy;
            }
        }
        let [sx, sy, sx2, sy2] = sums.map(|s| s / 9);
        Self {
            mean_ix: sx,
            mean_iy: sy,
            mean_ix2: sx2,
            mean_iy2: sy2,
        }
    }

    /// `<Ix^2><Iy^2> - (<Ix><Iy>)^2`.
    #[inline]
    pub fn determinant(&self) -> f64 {
        let cross = self.mean_ix * self.mean_iy;
        (self.mean_ix2 * self.mean_iy2 - cross * cross) as f64
    }

    /// `<Ix^2> + <Iy^2>`.
    #[inline]
    pub fn trace(&self) -> f64 {
        (self.mean_ix2 + self.mean_iy2) as f64
    }

    /// Eigenvalues `0.5 * (trace -/+ sqrt(trace^2 - 4 det))`, smaller first.
    pub fn eigenvalues(&self) -> (f64, f64) {
        let trace = self.trace();
        let disc = (trace * trace - 4.0 * self.determinant()).max(0.0).sqrt();
        (0.5 * (trace - disc), 0.5 * (trace + disc))
    }

    /// Harris response `det - k * trace^2`.
    #[inline]
    pub fn harris(&self, k: f64) -> f64 {
        let trace = self.trace();
        self.determinant() - k * trace * trace
    }

    /// Shi-Tomasi response, the smaller eigenvalue.
    #[inline]
    pub fn shi_tomasi(&self) -> f64 {
        let (e1, e2) = self.eigenvalues();
        e1.min(e2)
    }
}

/// A detected corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Column.
    pub x: u32,
    /// Row.
    pub y: u32,
    /// Response score.
    pub score: f64,
}

/// Response scores for every visited pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseMap {
    width: u32,
    height: u32,
    margin: u32,
    scores: Vec<Option<f64>>,
}

impl ResponseMap {
    /// Image width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Score at (x, y), or `None` inside the margin or outside the image.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.scores[y as usize * self.width as usize + x as usize]
    }

    /// Columns that are scored.
    pub fn columns(&self) -> std::ops::Range<u32> {
        self.margin..self.width.saturating_sub(self.margin)
    }

    /// Rows that are scored.
    pub fn rows(&self) -> std::ops::Range<u32> {
        self.margin..self.height.saturating_sub(self.margin)
    }

    /// Scored pixels in visit order: x outer, y inner.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        self.columns().flat_map(move |x| {
            self.rows()
                .filter_map(move |y| self.get(x, y).map(|score| (x, y, score)))
        })
    }
}

/// Configured corner detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerDetector {
    params: CornerParams,
}

impl CornerDetector {
    /// Creates a detector.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `params` fails
    /// [`CornerParams::validate`].
    pub fn new(params: CornerParams) -> OpsResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Detector with default parameters and the given formula.
    pub fn with_kind(kind: CornerKind) -> Self {
        Self {
            params: CornerParams::with_kind(kind),
        }
    }

    /// Parameters in effect.
    pub fn params(&self) -> &CornerParams {
        &self.params
    }

    /// Scores one structure tensor with the configured formula.
    #[inline]
    pub fn score(&self, tensor: &StructureTensor) -> f64 {
        match self.params.kind {
            CornerKind::Harris => tensor.harris(self.params.harris_k),
            CornerKind::ShiTomasi => tensor.shi_tomasi(),
        }
    }

    /// Scores every pixel outside the margin of a greyscale image.
    pub fn response_map(&self, grey: &PixelBuffer) -> ResponseMap {
        trace!(width = grey.width(), height = grey.height(), kind = self.params.kind.name(), "response_map");

        let (ix, iy) = partial_derivatives(grey);
        let (width, height) = grey.dimensions();
        let margin = self.params.margin;
        let cols = margin..width.saturating_sub(margin);
        let rows = margin..height.saturating_sub(margin);

        let mut scores = vec![None; grey.pixel_count()];
        for_each_row(&mut scores, width as usize, |y, row| {
            if !rows.contains(&y) {
                return;
            }
            for x in cols.clone() {
                let tensor = StructureTensor::from_window(&ix, &iy, x, y);
                row[x as usize] = Some(self.score(&tensor));
            }
        });

        ResponseMap {
            width,
            height,
            margin,
            scores,
        }
    }

    /// Pixels scoring strictly above the threshold, in visit order.
    pub fn find_corners(&self, grey: &PixelBuffer) -> Vec<Corner> {
        let threshold = self.params.threshold();
        self.response_map(grey)
            .iter()
            .filter(|&(_, _, score)| score > threshold)
            .map(|(x, y, score)| Corner { x, y, score })
            .collect()
    }

    /// Marks corners of `grey` on a copy of `original`.
    ///
    /// # Errors
    ///
    /// [`OpsError::SizeMismatch`] if the two buffers differ in size.
    pub fn detect(&self, grey: &PixelBuffer, original: &PixelBuffer) -> OpsResult<PixelBuffer> {
        if !grey.same_size(original) {
            return Err(OpsError::SizeMismatch(format!(
                "greyscale {}x{} vs original {}x{}",
                grey.width(),
                grey.height(),
                original.width(),
                original.height()
            )));
        }

        let map = self.response_map(grey);
        let threshold = self.params.threshold();
        let mut dst = original.blank_like();

        if self.params.border != BorderPolicy::LeaveUninitialized {
            let (cols, rows) = (map.columns(), map.rows());
            for (x, y, px) in original.pixels() {
                if !cols.contains(&x) || !rows.contains(&y) {
                    dst.put(x, y, px);
                }
            }
        }

        let mut found = 0usize;
        for (x, y, score) in map.iter() {
            if score > threshold {
                self.paint_marker(&mut dst, x, y);
                found += 1;
            } else {
                dst.put(x, y, original.pixel(x, y));
            }
        }

        debug!(kind = self.params.kind.name(), corners = found, threshold, "corner detection");
        Ok(dst)
    }

    /// Fills the square of half-width `marker_radius` around (x, y), skipping
    /// cells outside the buffer.
    fn paint_marker(&self, dst: &mut PixelBuffer, x: u32, y: u32) {
        let r = self.params.marker_radius as i64;
        let (cx, cy) = (x as i64, y as i64);
        for px in cx - r..=cx + r {
            for py in cy - r..=cy + r {
                if dst.contains(px, py) {
                    dst.put(px as u32, py as u32, self.params.marker);
                }
            }
        }
    }
}

/// Marks corners with explicit parameters.
pub fn detect_corners(
    grey: &PixelBuffer,
    original: &PixelBuffer,
    params: &CornerParams,
) -> OpsResult<PixelBuffer> {
    CornerDetector::new(*params)?.detect(grey, original)
}

/// Harris corners with default parameters.
pub fn detect_harris_corners(grey: &PixelBuffer, original: &PixelBuffer) -> OpsResult<PixelBuffer> {
    CornerDetector::with_kind(CornerKind::Harris).detect(grey, original)
}

/// Shi-Tomasi corners with default parameters.
pub fn detect_shi_tomasi_corners(grey: &PixelBuffer, original: &PixelBuffer) -> OpsResult<PixelBuffer> {
    CornerDetector::with_kind(CornerKind::ShiTomasi).detect(grey, original)
}
