//! Benchmarks for the gallery filters.
//!
//! Run with: `cargo bench --package gallery-bench`

use gallery_core::{PixelBuffer, Rgb};

/// Square benchmark sizes.
pub const SIZES: [u32; 3] = [64, 256, 1024];

/// Busy test image with edges and corners in every region.
pub fn test_image(size: u32) -> PixelBuffer {
    PixelBuffer::from_fn(size, size, |x, y| {
        let cell = ((x / 16) + (y / 16)) % 2 == 0;
        let base = ((x * 7 + y * 3) % 200) as i32;
        if cell {
            Rgb::new(base + 55, base / 2, 255 - base)
        } else {
            Rgb::new(base / 3, base + 40, base / 2)
        }
    })
    .unwrap_or_else(|e| panic!("benchmark image {size}x{size}: {e}"))
}
