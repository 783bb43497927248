//! Synthetic test images.

use gallery_core::{PixelBuffer, Rgb};

/// `size` x `size` black image with a white square over `[lo, hi]` on both axes.
pub fn white_square(size: u32, lo: u32, hi: u32) -> PixelBuffer {
    PixelBuffer::from_fn(size, size, |x, y| {
        if (lo..=hi).contains(&x) && (lo..=hi).contains(&y) {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    })
    .expect("fixture dimensions are non-zero")
}

/// Checkerboard of `cell` x `cell` squares in two colours.
pub fn checkerboard(width: u32, height: u32, cell: u32, a: Rgb, b: Rgb) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 { a } else { b }
    })
    .expect("fixture dimensions are non-zero")
}

/// Deterministic pseudo-random colours covering the full channel range.
pub fn noise(width: u32, height: u32, seed: u64) -> PixelBuffer {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) % 256) as i32
    };
    let mut img = PixelBuffer::new(width, height).expect("fixture dimensions are non-zero");
    for px in img.data_mut() {
        *px = Rgb::new(next(), next(), next());
    }
    img
}

/// Horizontal ramp from black to white with a fixed tint in blue.
pub fn ramp(width: u32, height: u32) -> PixelBuffer {
    let span = width.saturating_sub(1).max(1);
    PixelBuffer::from_fn(width, height, |x, _| {
        let v = (x * 255 / span) as i32;
        Rgb::new(v, v, 40)
    })
    .expect("fixture dimensions are non-zero")
}
