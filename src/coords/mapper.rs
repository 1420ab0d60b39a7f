//! Conversions between normalized, micrometer and tile pixel coordinates.
//!
//! Every function here is pure. Normalized inputs outside `[0, 1]` are not
//! rejected: template shapes are routinely placed with offsets that leave the
//! unit square before being mapped onto the slide.

use serde::{Deserialize, Serialize};

use super::frame::{MicronPoint, NativeResolution, NormalizedPoint, SlideFrame};

// =============================================================================
// Normalized <-> Micrometers
// =============================================================================

/// Normalized width to a width in micrometers.
pub fn normalized_width_to_microns(frame: &SlideFrame, width: f64) -> f64 {
    frame.width * width
}

/// Normalized height to a height in micrometers.
pub fn normalized_height_to_microns(frame: &SlideFrame, height: f64) -> f64 {
    frame.height * height
}

/// Normalized point to an absolute slide position in micrometers.
pub fn normalized_point_to_microns(frame: &SlideFrame, point: NormalizedPoint) -> MicronPoint {
    MicronPoint::new(
        frame.x + point.x * frame.width,
        frame.y + point.y * frame.height,
    )
}

/// Inverse of [`normalized_point_to_microns`].
///
/// Requires a frame with positive extent (see [`SlideFrame::validate`]).
pub fn microns_to_normalized_point(frame: &SlideFrame, point: MicronPoint) -> NormalizedPoint {
    NormalizedPoint::new(
        (point.x - frame.x) / frame.width,
        (point.y - frame.y) / frame.height,
    )
}

/// Map every point of a normalized path onto the slide, preserving order.
pub fn normalized_path_to_microns(
    frame: &SlideFrame,
    points: &[NormalizedPoint],
) -> Vec<MicronPoint> {
    points
        .iter()
        .map(|&p| normalized_point_to_microns(frame, p))
        .collect()
}

/// Scale then translate a normalized path: `(x, y) -> (x*sx + ox, y*sy + oy)`.
pub fn transform_normalized_path(
    points: &[NormalizedPoint],
    offset_x: f64,
    offset_y: f64,
    scale_x: f64,
    scale_y: f64,
) -> Vec<NormalizedPoint> {
    points
        .iter()
        .map(|p| NormalizedPoint::new(p.x * scale_x + offset_x, p.y * scale_y + offset_y))
        .collect()
}

// =============================================================================
// Pixels <-> Micrometers
// =============================================================================

/// Size in micrometers of a square patch of `pixel_width` native pixels.
///
/// Returns `(width_um, height_um)`. Both axes use the same pixel count; with
/// an anisotropic resolution the patch is square in pixels, not in microns.
pub fn pixel_width_to_microns(pixel_width: u32, resolution: &NativeResolution) -> (f64, f64) {
    pixel_size_to_microns(pixel_width, pixel_width, resolution)
}

/// Size in micrometers of a `width_px` x `height_px` patch of native pixels.
pub fn pixel_size_to_microns(
    width_px: u32,
    height_px: u32,
    resolution: &NativeResolution,
) -> (f64, f64) {
    (
        f64::from(width_px) * resolution.width,
        f64::from(height_px) * resolution.height,
    )
}

/// Micrometers covered by one pixel of a retrieved tile raster, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelScale {
    pub x: f64,
    pub y: f64,
}

impl PixelScale {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Ratio of tile size in microns to tile size in pixels.
    ///
    /// The raster returned for a tile is not guaranteed to have exactly the
    /// requested pixel size, so the ratio is taken from the actual raster.
    pub fn from_tile(width_um: f64, height_um: f64, width_px: u32, height_px: u32) -> Self {
        Self {
            x: width_um / f64::from(width_px),
            y: height_um / f64::from(height_px),
        }
    }
}

/// Tile-local pixel coordinate to an absolute slide position.
///
/// `origin + local * scale` per axis.
pub fn tile_pixel_to_micron(
    local_x: f64,
    local_y: f64,
    scale: PixelScale,
    tile_origin: MicronPoint,
) -> MicronPoint {
    MicronPoint::new(
        tile_origin.x + local_x * scale.x,
        tile_origin.y + local_y * scale.y,
    )
}

// =============================================================================
// Tests
// =============================================================================
