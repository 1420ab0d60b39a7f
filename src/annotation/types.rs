//! Annotation payloads and annotation class styling.

use serde::{Deserialize, Serialize};

use crate::contour::InstanceContour;
use crate::coords::MicronPoint;
use crate::tile::Tile;

// =============================================================================
// Annotation Classes
// =============================================================================

/// Default outline width in screen pixels.
pub const DEFAULT_OUTLINE_WIDTH: u32 = 3;

/// Default fill opacity when a fill color is set.
pub const DEFAULT_FILL_OPACITY: f32 = 0.3;

/// Display style and identity of a class of annotations.
///
/// Colors are `#AARRGGBB` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationClass {
    pub name: String,
    pub description: String,

    /// Optional grouping shown by the viewer
    pub group: Option<String>,

    pub outline_width: u32,
    pub outline_color: String,

    pub fill_color: Option<String>,

    /// Fill opacity in `[0, 1]`; ignored without a fill color
    pub opacity: f32,
}

impl AnnotationClass {
    /// An outline-only class.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        outline_width: u32,
        outline_color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            group: None,
            outline_width,
            outline_color: outline_color.into(),
            fill_color: None,
            opacity: 0.0,
        }
    }

    pub fn with_fill(mut self, fill_color: impl Into<String>, opacity: f32) -> Self {
        self.fill_color = Some(fill_color.into());
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Check that the class is named and every color is a well-formed
    /// `#AARRGGBB` string.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if !is_valid_argb_color(&self.outline_color) {
            return Err(format!("invalid outline color '{}'", self.outline_color));
        }
        if let Some(ref fill) = self.fill_color {
            if !is_valid_argb_color(fill) {
                return Err(format!("invalid fill color '{}'", fill));
            }
        }
        Ok(())
    }
}

/// Whether `color` is `#` followed by exactly eight hex digits.
pub fn is_valid_argb_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

// =============================================================================
// Annotations
// =============================================================================

/// Geometry of an annotation, in slide micrometers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnnotationShape {
    Rectangle {
        top_left: MicronPoint,
        bottom_right: MicronPoint,
    },

    /// Ellipse inscribed in the rectangle spanned by the two corners
    Ellipse {
        top_left: MicronPoint,
        bottom_right: MicronPoint,
    },

    /// Implicitly closed polygon
    Polygon { outline: Vec<MicronPoint> },

    /// Polygon with zero or more holes cut out of it
    PathWithHoles {
        outline: Vec<MicronPoint>,
        holes: Vec<Vec<MicronPoint>>,
    },
}

impl AnnotationShape {
    /// Short shape name as used by the slide service.
    pub fn type_name(&self) -> &'static str {
        match self {
            AnnotationShape::Rectangle { .. } => "Rectangle",
            AnnotationShape::Ellipse { .. } => "Ellipse",
            AnnotationShape::Polygon { .. } => "Polygon",
            AnnotationShape::PathWithHoles { .. } => "PathWithHoles",
        }
    }
}

/// An annotation, either ready for submission or read back from a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Assigned by the service once stored; `None` until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub shape: AnnotationShape,

    /// Name of an [`AnnotationClass`]
    pub class_name: String,
}

impl Annotation {
    pub fn new(shape: AnnotationShape, class_name: impl Into<String>) -> Self {
        Self {
            id: None,
            shape,
            class_name: class_name.into(),
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the annotation passes a shape type and class filter.
    ///
    /// `shape_type` is compared against [`AnnotationShape::type_name`]. A
    /// `None` or empty filter matches everything.
    pub fn matches(&self, shape_type: Option<&str>, class_name: Option<&str>) -> bool {
        let accepts = |filter: Option<&str>, value: &str| match filter {
            Some(wanted) if !wanted.is_empty() => wanted == value,
            _ => true,
        };
        accepts(shape_type, self.shape.type_name()) && accepts(class_name, &self.class_name)
    }

    /// A rectangle covering `tile`, tagged with a classification label.
    pub fn from_tile(tile: &Tile, label: impl Into<String>) -> Self {
        Self::new(
            AnnotationShape::Rectangle {
                top_left: tile.top_left,
                bottom_right: tile.bottom_right,
            },
            label,
        )
    }

    /// A polygon following an instance outline.
    pub fn from_contour(contour: &InstanceContour, class_name: impl Into<String>) -> Self {
        Self::new(
            AnnotationShape::Polygon {
                outline: contour.points.clone(),
            },
            class_name,
        )
    }
}
