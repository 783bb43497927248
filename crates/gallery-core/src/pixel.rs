//! RGB pixel type and channel clamping.
//!
//! Channels are stored as [`Channel`] (`i32`) rather than `u8`. Filters keep
//! every value they write inside `[0, 255]`, but the buffer itself does not
//! clamp, so a caller that writes out-of-range values gets them back unchanged.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer channel type.
pub type Channel = i32;

/// Smallest displayable channel value.
pub const CHANNEL_MIN: Channel = 0;

/// Largest displayable channel value.
pub const CHANNEL_MAX: Channel = 255;

/// Clamps an integer into the displayable channel range `[0, 255]`.
///
/// Used after every signed kernel sum (sharpen, gradients, edge magnitude).
///
/// ```rust
/// use gallery_core::map;
///
/// assert_eq!(map(-12), 0);
/// assert_eq!(map(300), 255);
/// assert_eq!(map(42), 42);
/// ```
#[inline]
pub fn map(n: Channel) -> Channel {
    n.clamp(CHANNEL_MIN, CHANNEL_MAX)
}

/// A single RGB pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    /// Red channel value.
    pub r: Channel,
    /// Green channel value.
    pub g: Channel,
    /// Blue channel value.
    pub b: Channel,
}

impl Rgb {
    /// Black `(0, 0, 0)`; the value of every freshly allocated pixel.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White `(255, 255, 255)`.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure green `(0, 255, 0)`, the corner marker colour.
    pub const GREEN: Self = Self::new(0, 255, 0);

    /// Create a new RGB pixel.
    #[inline]
    pub const fn new(r: Channel, g: Channel, b: Channel) -> Self {
        Self { r, g, b }
    }

    /// Create a grey pixel with equal RGB values.
    #[inline]
    pub const fn grey(v: Channel) -> Self {
        Self::new(v, v, v)
    }

    /// Returns the channels as an array `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [Channel; 3] {
        [self.r, self.g, self.b]
    }

    /// Builds a pixel from an array `[r, g, b]`.
    #[inline]
    pub const fn from_array(c: [Channel; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    /// Applies `f` to every channel.
    #[inline]
    pub fn map_channels(self, mut f: impl FnMut(Channel) -> Channel) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }

    /// Returns a copy with every channel clamped into `[0, 255]`.
    #[inline]
    pub fn clamped(self) -> Self {
        self.map_channels(map)
    }

    /// Returns `true` if R, G and B are equal.
    #[inline]
    pub fn is_grey(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Returns `true` if every channel lies in `[0, 255]`.
    #[inline]
    pub fn in_range(self) -> bool {
        self.to_array()
            .iter()
            .all(|c| (CHANNEL_MIN..=CHANNEL_MAX).contains(c))
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(c: [u8; 3]) -> Self {
        Self::new(c[0] as Channel, c[1] as Channel, c[2] as Channel)
    }
}

impl From<(Channel, Channel, Channel)> for Rgb {
    fn from((r, g, b): (Channel, Channel, Channel)) -> Self {
        Self::new(r, g, b)
    }
}
