//! Contour localization integration tests.
//!
//! Tests verify:
//! - 8 and 16-bit label masks load from disk with labels unchanged
//! - Color masks are rejected
//! - Every instance yields one outline placed on the slide
//! - Outlines turn into polygon annotations
//! - Unreadable masks report an error

use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
use tempfile::TempDir;

use wsi_tiler::annotation::{Annotation, AnnotationShape};
use wsi_tiler::contour::{extract_contours, LabelMask};
use wsi_tiler::coords::{MicronPoint, PixelScale};
use wsi_tiler::error::MaskError;

/// 64x64 mask with two instances; label 300 needs more than 8 bits.
fn write_mask(dir: &TempDir) -> std::path::PathBuf {
    let image = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(64, 64, |x, y| {
        if (4..20).contains(&x) && (4..12).contains(&y) {
            Luma([1])
        } else if (40..60).contains(&x) && (30..50).contains(&y) {
            Luma([300])
        } else {
            Luma([0])
        }
    });
    let path = dir.path().join("mask.png");
    image.save(&path).unwrap();
    path
}

#[test]
fn test_mask_from_png() {
    let dir = TempDir::new().unwrap();
    let mask = LabelMask::open(write_mask(&dir)).unwrap();

    assert_eq!((mask.width(), mask.height()), (64, 64));
    assert_eq!(mask.get(5, 5), Some(1));
    assert_eq!(mask.get(45, 35), Some(300));
    assert_eq!(mask.get(0, 0), Some(0));

    let bounds = mask.label_bounds();
    assert_eq!(bounds.len(), 2);
    assert_eq!(bounds[&300].min_x, 40);
    assert_eq!(bounds[&300].max_y, 49);
}

#[test]
fn test_contours_from_png_placed_on_slide() {
    let dir = TempDir::new().unwrap();
    let mask = LabelMask::open(write_mask(&dir)).unwrap();

    // 64 px mask covering a 128 x 32 um tile
    let scale = PixelScale::from_tile(128.0, 32.0, mask.width(), mask.height());
    let origin = MicronPoint::new(5000.0, 7000.0);
    let contours = extract_contours(&mask, origin, scale.x, scale.y);

    assert_eq!(contours.len(), 2);
    assert_eq!(contours[0].label, 1);
    assert_eq!(contours[1].label, 300);

    let big = &contours[1];
    let min_x = big.points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let max_x = big.points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let min_y = big.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_y = big.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
    assert_eq!((min_x, max_x), (5000.0 + 40.0 * 2.0, 5000.0 + 59.0 * 2.0));
    assert_eq!((min_y, max_y), (7000.0 + 30.0 * 0.5, 7000.0 + 49.0 * 0.5));

    let annotation = Annotation::from_contour(big, "Cells");
    match annotation.shape {
        AnnotationShape::Polygon { outline } => assert_eq!(outline, big.points),
        other => panic!("Expected Polygon, got {:?}", other),
    }
}

#[test]
fn test_mask_from_8bit_png() {
    let dir = TempDir::new().unwrap();
    let image = GrayImage::from_fn(32, 32, |x, y| {
        if (4..12).contains(&x) && (4..12).contains(&y) {
            Luma([1])
        } else if (20..28).contains(&x) && (20..28).contains(&y) {
            Luma([2])
        } else {
            Luma([0])
        }
    });
    let path = dir.path().join("mask8.png");
    image.save(&path).unwrap();

    let mask = LabelMask::open(&path).unwrap();
    assert_eq!(mask.get(6, 6), Some(1));
    assert_eq!(mask.get(24, 24), Some(2));

    let labels: Vec<u32> = extract_contours(&mask, MicronPoint::new(0.0, 0.0), 1.0, 1.0)
        .iter()
        .map(|c| c.label)
        .collect();
    assert_eq!(labels, vec![1, 2]);
}

#[test]
fn test_color_mask_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("color.png");
    RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]))
        .save(&path)
        .unwrap();

    match LabelMask::open(&path) {
        Err(MaskError::Image(message)) => assert!(message.contains("grayscale")),
        other => panic!("Expected MaskError::Image, got {:?}", other),
    }
}

#[test]
fn test_missing_mask_file() {
    let dir = TempDir::new().unwrap();
    let result = LabelMask::open(dir.path().join("missing.png"));

    assert!(matches!(result, Err(MaskError::Image(_))));
}

#[test]
fn test_corrupt_mask_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mask.png");
    std::fs::write(&path, b"not a png").unwrap();

    assert!(matches!(LabelMask::open(&path), Err(MaskError::Image(_))));
}
