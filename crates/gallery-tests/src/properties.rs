//! Properties that hold for every input image.

use gallery_core::{PixelBuffer, Rgb};
use gallery_ops::corner::CornerDetector;
use gallery_ops::pointwise::{binarize, cartoon, greyscale, negative};
use gallery_ops::spatial::{box_blur, gaussian_blur, sharpen};
use gallery_ops::{CornerKind, CornerParams, Filter, FilterParams};

use crate::fixtures::{checkerboard, noise, ramp, white_square};

/// A spread of inputs: noise, hard edges, smooth ramps, odd sizes.
fn inputs() -> Vec<PixelBuffer> {
    vec![
        noise(17, 11, 1),
        noise(32, 32, 7),
        noise(1, 1, 3),
        checkerboard(24, 18, 4, Rgb::new(200, 30, 90), Rgb::new(10, 240, 60)),
        ramp(40, 6),
        white_square(20, 6, 13),
    ]
}

#[test]
fn test_negative_is_involution() {
    for img in inputs() {
        assert_eq!(negative(&negative(&img)), img);
    }
}

#[test]
fn test_greyscale_channels_equal() {
    for img in inputs() {
        let grey = greyscale(&img);
        assert!(grey.data().iter().all(|p| p.is_grey() && p.in_range()));
    }
}

#[test]
fn test_threshold_is_binary() {
    for img in inputs() {
        let out = binarize(&img);
        assert!(out.data().iter().all(|&p| p == Rgb::BLACK || p == Rgb::WHITE));
    }
}

#[test]
fn test_cartoon_levels() {
    const LEVELS: [i32; 4] = [0, 85, 170, 255];
    for img in inputs() {
        let out = cartoon(&img);
        assert!(out.data().iter().all(|p| p.to_array().iter().all(|c| LEVELS.contains(c))));
    }
}

#[test]
fn test_uniform_blur_interior_unchanged() {
    for px in [Rgb::new(12, 200, 99), Rgb::WHITE, Rgb::BLACK] {
        let img = PixelBuffer::filled(12, 9, px).unwrap();
        let boxed = box_blur(&img).unwrap();
        let gauss = gaussian_blur(&img).unwrap();
        for y in 2..7 {
            for x in 2..10 {
                assert_eq!(boxed.pixel(x, y), px);
                assert_eq!(gauss.pixel(x, y), px);
            }
        }
    }
}

#[test]
fn test_sharpen_twice_flat() {
    let px = Rgb::new(33, 66, 99);
    let img = PixelBuffer::filled(10, 10, px).unwrap();
    let twice = sharpen(&sharpen(&img).unwrap()).unwrap();
    for y in 2..8 {
        for x in 2..8 {
            assert_eq!(twice.pixel(x, y), px);
        }
    }
}

#[test]
fn test_corners_stay_out_of_margin() {
    for kind in [CornerKind::Harris, CornerKind::ShiTomasi] {
        // A low threshold so that noise produces plenty of corners.
        let params = CornerParams {
            harris_threshold: 0.0,
            shi_tomasi_threshold: 0.0,
            marker_radius: 0,
            ..CornerParams::with_kind(kind)
        };
        let detector = CornerDetector::new(params).unwrap();
        for img in inputs() {
            let grey = greyscale(&img);
            let (w, h) = img.dimensions();
            for c in detector.find_corners(&grey) {
                assert!(c.x >= 3 && c.x + 3 < w, "{kind:?} corner at x = {}", c.x);
                assert!(c.y >= 3 && c.y + 3 < h, "{kind:?} corner at y = {}", c.y);
            }
            let marked = detector.detect(&grey, &img).unwrap();
            for (x, y, p) in marked.pixels() {
                if x < 3 || y < 3 || x + 3 >= w || y + 3 >= h {
                    assert_eq!(p, Rgb::BLACK, "{kind:?} margin pixel ({x}, {y})");
                }
            }
        }
    }
}

#[test]
fn test_every_filter_preserves_size_and_input() {
    let params = FilterParams::default();
    for img in inputs() {
        let before = img.clone();
        for f in Filter::ALL {
            let out = f.apply(&img, &params).unwrap();
            assert!(out.same_size(&img), "{f}");
            assert!(out.data().iter().all(|p| p.in_range()), "{f}");
        }
        assert_eq!(img, before);
    }
}
