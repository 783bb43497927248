//! Concrete scenarios and preset pipelines.

use gallery_core::{PixelBuffer, Rgb};
use gallery_ops::corner::{detect_harris_corners, CornerDetector};
use gallery_ops::gradient::sobel;
use gallery_ops::pointwise::{greyscale, sepia};
use gallery_ops::{BorderPolicy, CornerKind, Filter, FilterParams};
use tempfile::tempdir;

use crate::fixtures::white_square;
use crate::preset::{builtin, Preset, PresetError, BUILTIN};

#[test]
fn test_single_pixel_image() {
    let img = PixelBuffer::filled(1, 1, Rgb::new(100, 150, 200)).unwrap();
    let params = FilterParams::default();
    let run = |f: Filter| f.apply(&img, &params).unwrap().pixel(0, 0);

    assert_eq!(run(Filter::BoxBlur), Rgb::new(4, 6, 8));
    assert_eq!(run(Filter::GaussianBlur), Rgb::new(14, 21, 28));
    assert_eq!(run(Filter::Sharpen), Rgb::WHITE);
    assert_eq!(run(Filter::Sobel), Rgb::BLACK);
    assert_eq!(run(Filter::Prewitt), Rgb::BLACK);
    assert_eq!(run(Filter::Pixelate), Rgb::BLACK);
    assert_eq!(run(Filter::Harris), Rgb::BLACK);
    assert_eq!(run(Filter::ShiTomasi), Rgb::BLACK);
}

#[test]
fn test_black_image_has_no_harris_corners() {
    let img = PixelBuffer::new(10, 10).unwrap();
    let grey = greyscale(&img);
    let detector = CornerDetector::with_kind(CornerKind::Harris);
    assert!(detector.find_corners(&grey).is_empty());
    assert_eq!(detect_harris_corners(&grey, &img).unwrap(), img);
}

#[test]
fn test_sepia_of_white() {
    // Red and green sums exceed 1 and clamp; blue sums to 0.937.
    let img = PixelBuffer::filled(2, 2, Rgb::WHITE).unwrap();
    assert_eq!(sepia(&img).pixel(1, 1), Rgb::new(255, 255, 238));
}

#[test]
fn test_edge_pipeline_outlines_square() {
    let img = white_square(20, 6, 13);
    let edges = sobel(&img).unwrap();
    assert_eq!(edges.pixel(6, 10), Rgb::grey(255));
    assert_eq!(edges.pixel(13, 10), Rgb::grey(255));
    assert_eq!(edges.pixel(10, 10), Rgb::BLACK);
    assert_eq!(edges.pixel(2, 2), Rgb::BLACK);
}

#[test]
fn test_builtin_presets_parse() {
    for (file, doc) in BUILTIN {
        let preset = Preset::from_yaml(doc).unwrap_or_else(|e| panic!("{file}: {e}"));
        assert!(!preset.filters.is_empty(), "{file}");
    }
    assert!(builtin("missing").is_none());
}

#[test]
fn test_edges_preset() {
    let preset = builtin("edges").unwrap().unwrap();
    assert_eq!(preset.filters, [Filter::GaussianBlur, Filter::Sobel, Filter::Threshold]);
    assert_eq!(preset.params.threshold.cutoff, 64);
    // Untouched sections keep their defaults.
    assert_eq!(preset.params.contrast, FilterParams::default().contrast);

    let out = preset.run(&white_square(24, 8, 15)).unwrap();
    assert!(out.data().iter().all(|&p| p == Rgb::BLACK || p == Rgb::WHITE));
    assert_eq!(out.pixel(8, 12), Rgb::WHITE);
}

#[test]
fn test_comic_preset() {
    let preset = builtin("comic").unwrap().unwrap();
    assert_eq!(preset.params.blur_border, BorderPolicy::SkipAndRenormalize);
    let img = crate::fixtures::noise(16, 16, 11);
    let out = preset.run(&img).unwrap();
    assert!(out
        .data()
        .iter()
        .all(|p| p.to_array().iter().all(|c| [0, 85, 170, 255].contains(c))));
}

#[test]
fn test_corners_preset() {
    let preset = builtin("corners").unwrap().unwrap();
    let corners = &preset.params.corners;
    assert_eq!(corners.shi_tomasi_threshold, 5000.0);
    assert_eq!(corners.marker, Rgb::new(255, 0, 0));
    assert_eq!(corners.border, BorderPolicy::ZeroPad);
    assert_eq!(corners.harris_threshold, 20_000_000.0);

    let img = PixelBuffer::from_fn(20, 20, |x, y| {
        if (6..=13).contains(&x) && (6..=13).contains(&y) {
            Rgb::WHITE
        } else {
            Rgb::grey(50)
        }
    })
    .unwrap();
    let out = preset.run(&img).unwrap();
    assert_eq!(out.pixel(5, 5), Rgb::new(255, 0, 0));
    // Margin copied through instead of left black.
    assert_eq!(out.pixel(0, 0), Rgb::grey(50));
    assert_eq!(out.pixel(19, 19), Rgb::grey(50));
    assert_eq!(out.pixel(10, 10), Rgb::WHITE);
}

#[test]
fn test_preset_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("custom.yaml");

    let mut preset = builtin("edges").unwrap().unwrap();
    preset.name = "custom".into();
    preset.params.corners.margin = 5;
    std::fs::write(&path, preset.to_yaml().unwrap()).unwrap();

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
}

#[test]
fn test_preset_errors() {
    let err = Preset::from_yaml("name: bad\nfilters: [emboss]\n").unwrap_err();
    assert!(matches!(err, PresetError::Yaml(_)));

    let err = Preset::load("/nonexistent/preset.yaml").unwrap_err();
    assert!(matches!(err, PresetError::Io(_)));

    let bad = Preset {
        name: "bad".into(),
        filters: vec![Filter::Harris],
        params: FilterParams {
            corners: gallery_ops::CornerParams {
                margin: 0,
                ..Default::default()
            },
            ..Default::default()
        },
    };
    let img = PixelBuffer::new(8, 8).unwrap();
    assert!(matches!(bad.run(&img), Err(PresetError::Ops(_))));
}
