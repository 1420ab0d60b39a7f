//! Per-instance outline extraction.
//!
//! For every label in a tile's instance mask:
//!
//! 1. Crop the label's bounding box into a binary image (one pixel of
//!    background padding so objects touching the crop edge still trace)
//! 2. Follow the external borders (Suzuki-Abe via `imageproc`); holes are
//!    ignored
//! 3. Keep the border enclosing the largest area when the label is split
//!    into several fragments
//! 4. Shift back to tile pixel coordinates, clip to the mask extent
//! 5. Map into slide micrometers with [`tile_pixel_to_micron`]
//!
//! Outlines with fewer than three points are noise and are dropped.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::point::Point;
use serde::{Deserialize, Serialize};

use crate::coords::{tile_pixel_to_micron, MicronPoint, PixelScale};

use super::mask::{LabelBounds, LabelMask};

/// Minimum number of points for an outline to form a polygon.
pub const MIN_CONTOUR_POINTS: usize = 3;

/// Padding added around each cropped label.
const PAD: u32 = 1;

/// Outline of one detected instance in slide micrometers.
///
/// The polygon is implicitly closed: the last point connects to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceContour {
    /// Mask label the outline was traced from
    pub label: u32,

    pub points: Vec<MicronPoint>,
}

/// Trace one outline per instance and place it on the slide.
///
/// `scale_x` / `scale_y` are micrometers per mask pixel and `tile_origin` is
/// the tile's top-left corner in slide micrometers. Labels are visited in
/// ascending order.
pub fn extract_contours(
    mask: &LabelMask,
    tile_origin: MicronPoint,
    scale_x: f64,
    scale_y: f64,
) -> Vec<InstanceContour> {
    let scale = PixelScale::new(scale_x, scale_y);

    mask.label_bounds()
        .into_iter()
        .filter_map(|(label, bounds)| {
            let outline = largest_external_outline(mask, label, &bounds)?;
            let points = to_tile_pixels(&outline, &bounds, mask)
                .into_iter()
                .map(|(x, y)| tile_pixel_to_micron(x, y, scale, tile_origin))
                .collect::<Vec<_>>();

            if points.len() < MIN_CONTOUR_POINTS {
                return None;
            }
            Some(InstanceContour { label, points })
        })
        .collect()
}

/// Absolute area enclosed by a closed polygon (shoelace formula).
pub fn contour_area(points: &[(f64, f64)]) -> f64 {
    if points.len() < MIN_CONTOUR_POINTS {
        return 0.0;
    }
    let twice: f64 = points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| a.0 * b.1 - b.0 * a.1)
        .sum();
    twice.abs() / 2.0
}

/// Binary crop of `label`, padded by [`PAD`] on every side.
fn label_crop(mask: &LabelMask, label: u32, bounds: &LabelBounds) -> GrayImage {
    GrayImage::from_fn(
        bounds.width() + 2 * PAD,
        bounds.height() + 2 * PAD,
        |cx, cy| {
            let inside = cx >= PAD
                && cy >= PAD
                && mask.get(bounds.min_x + cx - PAD, bounds.min_y + cy - PAD) == Some(label);
            Luma([if inside { 255 } else { 0 }])
        },
    )
}

fn largest_external_outline(
    mask: &LabelMask,
    label: u32,
    bounds: &LabelBounds,
) -> Option<Vec<Point<i32>>> {
    let crop = label_crop(mask, label, bounds);
    let contours: Vec<Contour<i32>> = find_contours(&crop);

    let mut best: Option<(f64, Vec<Point<i32>>)> = None;
    for contour in contours {
        if contour.border_type != BorderType::Outer || contour.parent.is_some() {
            continue;
        }
        let area = contour_area(
            &contour
                .points
                .iter()
                .map(|p| (f64::from(p.x), f64::from(p.y)))
                .collect::<Vec<_>>(),
        );
        // First fragment wins ties.
        if best.as_ref().map_or(true, |(best_area, _)| area > *best_area) {
            best = Some((area, contour.points));
        }
    }

    best.map(|(_, points)| points)
}

/// Crop coordinates to tile pixel coordinates, clipped to the mask extent.
fn to_tile_pixels(points: &[Point<i32>], bounds: &LabelBounds, mask: &LabelMask) -> Vec<(f64, f64)> {
    let max_x = f64::from(mask.width().saturating_sub(1));
    let max_y = f64::from(mask.height().saturating_sub(1));
    let offset_x = f64::from(bounds.min_x) - f64::from(PAD);
    let offset_y = f64::from(bounds.min_y) - f64::from(PAD);

    points
        .iter()
        .map(|p| {
            (
                (f64::from(p.x) + offset_x).clamp(0.0, max_x),
                (f64::from(p.y) + offset_y).clamp(0.0, max_y),
            )
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
