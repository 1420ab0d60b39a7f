//! Regions of interest.
//!
//! A slide service reports ROIs either as plain rectangles or as arbitrary
//! shapes. Tiling only ever looks at the bounding rectangle, which the
//! [`BoundingRect`] capability provides for every variant.

use serde::{Deserialize, Serialize};

use crate::coords::{MicronPoint, MicronRect, SlideFrame};

/// Anything that can report its axis-aligned bounds in slide micrometers.
pub trait BoundingRect {
    fn bounding_rect(&self) -> MicronRect;
}

impl BoundingRect for MicronRect {
    fn bounding_rect(&self) -> MicronRect {
        *self
    }
}

impl BoundingRect for SlideFrame {
    fn bounding_rect(&self) -> MicronRect {
        self.as_rect()
    }
}

// =============================================================================
// Shapes
// =============================================================================

/// Geometry kind of a non-rectangular ROI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Axis-aligned ellipse given by two opposite corners of its bounding box
    Ellipse,
    Polygon,
    Path,
}

/// A non-rectangular ROI described by its points in micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiShape {
    pub kind: ShapeKind,
    pub points: Vec<MicronPoint>,
}

impl RoiShape {
    pub fn new(kind: ShapeKind, points: Vec<MicronPoint>) -> Self {
        Self { kind, points }
    }
}

impl BoundingRect for RoiShape {
    /// Bounds of the shape's points; an empty shape has a zero-size rectangle
    /// at the origin and therefore produces no tiles.
    fn bounding_rect(&self) -> MicronRect {
        MicronRect::enclosing(&self.points).unwrap_or_default()
    }
}

// =============================================================================
// Roi
// =============================================================================

/// A region of interest on the slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Roi {
    /// Axis-aligned rectangle, tiled exactly
    Rectangle(MicronRect),

    /// Any other shape, tiled through its bounding rectangle
    BoundedShape(RoiShape),
}

impl Roi {
    pub fn rectangle(x: f64, y: f64, width: f64, height: f64) -> Self {
        Roi::Rectangle(MicronRect::new(x, y, width, height))
    }

    pub fn shape(kind: ShapeKind, points: Vec<MicronPoint>) -> Self {
        Roi::BoundedShape(RoiShape::new(kind, points))
    }

    /// Whether tiling this ROI is exact.
    ///
    /// For other shapes the tiles cover the whole bounding rectangle.
    pub fn is_rectangular(&self) -> bool {
        matches!(self, Roi::Rectangle(_))
    }

    /// Human-readable shape name for log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Roi::Rectangle(_) => "Rectangle",
            Roi::BoundedShape(shape) => match shape.kind {
                ShapeKind::Ellipse => "Ellipse",
                ShapeKind::Polygon => "Polygon",
                ShapeKind::Path => "Path",
            },
        }
    }
}

impl BoundingRect for Roi {
    fn bounding_rect(&self) -> MicronRect {
        match self {
            Roi::Rectangle(rect) => *rect,
            Roi::BoundedShape(shape) => shape.bounding_rect(),
        }
    }
}

impl From<MicronRect> for Roi {
    fn from(rect: MicronRect) -> Self {
        Roi::Rectangle(rect)
    }
}

impl From<SlideFrame> for Roi {
    fn from(frame: SlideFrame) -> Self {
        Roi::Rectangle(frame.as_rect())
    }
}

/// The given ROIs, or the whole slide when there are none.
pub fn rois_or_whole_slide(rois: Vec<Roi>, frame: &SlideFrame) -> Vec<Roi> {
    if rois.is_empty() {
        vec![Roi::from(*frame)]
    } else {
        rois
    }
}
