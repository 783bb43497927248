//! Owned RGB pixel buffer.
//!
//! [`PixelBuffer`] is the unit every filter consumes and produces. A filter
//! never mutates its input: it allocates a fresh, black buffer of the same
//! dimensions and fills it.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom:
//!
//! ```text
//! data: [(0,0) (1,0) ... (w-1,0)]  <- row 0
//!       [(0,1) (1,1) ... (w-1,1)]  <- row 1
//!       ...
//! ```
//!
//! # Accessors
//!
//! - [`get`](PixelBuffer::get) / [`set`](PixelBuffer::set) are checked and
//!   return [`Error::OutOfBounds`] for coordinates outside the buffer.
//! - [`pixel`](PixelBuffer::pixel) / [`put`](PixelBuffer::put) are for filter
//!   loops whose bounds already guarantee validity; they panic on misuse.
//!
//! # Usage
//!
//! ```rust
//! use gallery_core::{PixelBuffer, Rgb};
//!
//! let img = PixelBuffer::filled(3, 2, Rgb::new(1, 2, 3)).unwrap();
//! assert_eq!(img.dimensions(), (3, 2));
//! for (_, _, px) in img.pixels() {
//!     assert_eq!(px, Rgb::new(1, 2, 3));
//! }
//! ```

use crate::{Channel, Error, Result, Rgb};

/// Owned width x height grid of [`Rgb`] pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Pixel data in row-major order. Length = width * height.
    data: Vec<Rgb>,
    /// Buffer width in pixels.
    width: u32,
    /// Buffer height in pixels.
    height: u32,
}

impl PixelBuffer {
    /// Creates a black buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `width` or `height` is zero.
    ///
    /// ```rust
    /// use gallery_core::{PixelBuffer, Rgb};
    ///
    /// let img = PixelBuffer::new(2, 2).unwrap();
    /// assert_eq!(img.pixel(1, 1), Rgb::BLACK);
    /// assert!(PixelBuffer::new(0, 5).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Creates a buffer with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgb) -> Result<Self> {
        let count = checked_count(width, height)?;
        Ok(Self {
            data: vec![pixel; count],
            width,
            height,
        })
    }

    /// Creates a buffer by evaluating `f(x, y)` for every pixel.
    ///
    /// ```rust
    /// use gallery_core::{PixelBuffer, Rgb};
    ///
    /// let ramp = PixelBuffer::from_fn(4, 1, |x, _| Rgb::grey(x as i32 * 10)).unwrap();
    /// assert_eq!(ramp.pixel(3, 0), Rgb::grey(30));
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let count = checked_count(width, height)?;
        let mut data = Vec::with_capacity(count);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Creates a buffer from interleaved 8-bit RGB bytes (as produced by a codec).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] for an empty size and
    /// [`Error::InvalidData`] if `bytes.len() != width * height * 3`.
    pub fn from_rgb8(width: u32, height: u32, bytes: &[u8]) -> Result<Self> {
        let count = checked_count(width, height)?;
        let expected = count * 3;
        if bytes.len() != expected {
            return Err(Error::InvalidData {
                expected,
                got: bytes.len(),
            });
        }
        let data = bytes
            .chunks_exact(3)
            .map(|c| Rgb::from([c[0], c[1], c[2]]))
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns interleaved 8-bit RGB bytes, clamping every channel into `[0, 255]`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() * 3);
        for px in &self.data {
            let px = px.clamped();
            out.extend_from_slice(&[px.r as u8, px.g as u8, px.b as u8]);
        }
        out
    }

    /// Creates a black buffer with the same dimensions as `self`.
    #[inline]
    pub fn blank_like(&self) -> Self {
        Self {
            data: vec![Rgb::BLACK; self.data.len()],
            width: self.width,
            height: self.height,
        }
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the buffer dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if both buffers have the same dimensions.
    #[inline]
    pub fn same_size(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Returns `true` if the signed coordinate lies inside the buffer.
    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if (x, y) is outside the buffer.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<Rgb> {
        if x < self.width && y < self.height {
            Ok(self.data[self.offset(x, y)])
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// Channels are stored as given; keeping them inside `[0, 255]` is the
    /// caller's job.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if (x, y) is outside the buffer.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: impl Into<Rgb>) -> Result<()> {
        if x < self.width && y < self.height {
            let idx = self.offset(x, y);
            self.data[idx] = pixel.into();
            Ok(())
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the red channel at (x, y); the intensity of a greyscale buffer.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn intensity(&self, x: u32, y: u32) -> Channel {
        self.pixel(x, y).r
    }

    /// Writes the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, pixel: Rgb) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = self.offset(x, y);
        self.data[idx] = pixel;
    }

    /// Returns the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgb] {
        let start = self.offset(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Returns the raw pixel slice in row-major order.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Returns the raw pixel slice mutably, for filters filling a fresh buffer
    /// row by row.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    /// Iterates over all pixels with their coordinates, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let width = self.width;
        self.data.iter().enumerate().map(move |(i, px)| {
            let i = i as u32;
            (i % width, i / width, *px)
        })
    }

    /// Sets every pixel to `pixel`.
    pub fn fill(&mut self, pixel: Rgb) {
        self.data.fill(pixel);
    }
}

/// Validates dimensions and returns the pixel count.
fn checked_count(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(
            width,
            height,
            "width and height must be positive",
        ));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height, "pixel count overflows"))
}
