//! Slide geometry types.
//!
//! All slide-space values are in micrometers (um). Normalized values are
//! relative to the [`SlideFrame`], with (0, 0) at the frame origin and (1, 1)
//! at its far corner.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

// =============================================================================
// Points and Rectangles
// =============================================================================

/// A point in slide micrometer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MicronPoint {
    pub x: f64,
    pub y: f64,
}

impl MicronPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point relative to the slide frame.
///
/// Components are nominally in `[0.0, 1.0]` but this is not enforced:
/// out-of-range values extrapolate linearly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in slide micrometer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MicronRect {
    /// Left edge
    pub x: f64,

    /// Top edge
    pub y: f64,

    pub width: f64,

    pub height: f64,
}

impl MicronRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point, or `None` for an empty set.
    pub fn enclosing(points: &[MicronPoint]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn top_left(&self) -> MicronPoint {
        MicronPoint::new(self.x, self.y)
    }

    pub fn bottom_right(&self) -> MicronPoint {
        MicronPoint::new(self.x + self.width, self.y + self.height)
    }

    /// Whether `p` lies inside the rectangle (edges inclusive).
    pub fn contains(&self, p: MicronPoint) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

// =============================================================================
// Slide Metadata
// =============================================================================

/// The physical extent of a slide in micrometers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SlideFrame {
    /// Create a frame, rejecting non-positive or non-finite sizes.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Result<Self, GeometryError> {
        let frame = Self {
            x,
            y,
            width,
            height,
        };
        frame.validate()?;
        Ok(frame)
    }

    /// Check the size invariant.
    ///
    /// Frames deserialized from service metadata bypass [`SlideFrame::new`],
    /// so consumers call this before relying on the frame.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(())
        } else {
            Err(GeometryError::InvalidFrame {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// The frame as a plain rectangle.
    pub fn as_rect(&self) -> MicronRect {
        MicronRect::new(self.x, self.y, self.width, self.height)
    }
}

/// Micrometers per pixel of the slide's base layer, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeResolution {
    /// um/pixel along x
    pub width: f64,

    /// um/pixel along y
    pub height: f64,
}

impl NativeResolution {
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        let resolution = Self { width, height };
        resolution.validate()?;
        Ok(resolution)
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        if is_positive(self.width) && is_positive(self.height) {
            Ok(())
        } else {
            Err(GeometryError::InvalidResolution {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Resolution multiplied on both axes, e.g. to request a downsampled region.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// =============================================================================
// Tests
// =============================================================================
