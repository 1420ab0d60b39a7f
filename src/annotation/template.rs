//! Predefined annotation shapes and class palettes.

use crate::coords::{
    normalized_path_to_microns, transform_normalized_path, NormalizedPoint, SlideFrame,
};

use super::types::{
    Annotation, AnnotationClass, AnnotationShape, DEFAULT_FILL_OPACITY, DEFAULT_OUTLINE_WIDTH,
};

/// Class name used for [`face_annotation`].
pub const FACE_CLASS: &str = "Face";

/// Class name used for segmented cell outlines.
pub const CELL_CLASS: &str = "Cells";

const FACE_OUTLINE: [NormalizedPoint; 4] = [
    NormalizedPoint::new(0.0, 0.0),
    NormalizedPoint::new(1.0, 0.0),
    NormalizedPoint::new(0.9, 1.0),
    NormalizedPoint::new(0.1, 1.0),
];

const LEFT_EYE: [NormalizedPoint; 4] = [
    NormalizedPoint::new(0.15, 0.12),
    NormalizedPoint::new(0.27, 0.12),
    NormalizedPoint::new(0.27, 0.24),
    NormalizedPoint::new(0.15, 0.24),
];

const RIGHT_EYE: [NormalizedPoint; 4] = [
    NormalizedPoint::new(0.73, 0.12),
    NormalizedPoint::new(0.85, 0.12),
    NormalizedPoint::new(0.85, 0.24),
    NormalizedPoint::new(0.73, 0.24),
];

const NOSE: [NormalizedPoint; 3] = [
    NormalizedPoint::new(0.5, 0.18),
    NormalizedPoint::new(0.58, 0.43),
    NormalizedPoint::new(0.42, 0.43),
];

const MOUTH: [NormalizedPoint; 6] = [
    NormalizedPoint::new(0.2, 0.55),
    NormalizedPoint::new(0.85, 0.55),
    NormalizedPoint::new(0.75, 0.85),
    NormalizedPoint::new(0.60, 0.90),
    NormalizedPoint::new(0.45, 0.90),
    NormalizedPoint::new(0.30, 0.85),
];

/// A face-shaped `PathWithHoles` placed on the slide.
///
/// The template is drawn in the unit square, scaled by `(scale_x, scale_y)`
/// and moved to `(offset_x, offset_y)`, all in normalized slide units.
pub fn face_annotation(
    frame: &SlideFrame,
    offset_x: f64,
    offset_y: f64,
    scale_x: f64,
    scale_y: f64,
) -> Annotation {
    let place = |path: &[NormalizedPoint]| {
        normalized_path_to_microns(
            frame,
            &transform_normalized_path(path, offset_x, offset_y, scale_x, scale_y),
        )
    };

    let holes = [&LEFT_EYE[..], &RIGHT_EYE[..], &NOSE[..], &MOUTH[..]]
        .into_iter()
        .map(&place)
        .collect();

    Annotation::new(
        AnnotationShape::PathWithHoles {
            outline: place(&FACE_OUTLINE[..]),
            holes,
        },
        FACE_CLASS,
    )
}

/// Style for the face class.
pub fn face_class() -> AnnotationClass {
    AnnotationClass::new(FACE_CLASS, "Face annotations", DEFAULT_OUTLINE_WIDTH, "#ff900070")
        .with_fill("#ffbb00aa", 0.6)
}

/// Style for segmented cell outlines.
pub fn cell_class() -> AnnotationClass {
    AnnotationClass::new(CELL_CLASS, CELL_CLASS, DEFAULT_OUTLINE_WIDTH, "#FFFF0000")
        .with_group("Cell segmentation")
        .with_fill("#FFFF0000", DEFAULT_FILL_OPACITY)
}

/// Seven-class palette for colon tissue tile classification.
///
/// Order matches the classifier output vector.
pub fn colon_tissue_classes() -> Vec<AnnotationClass> {
    let filled = |name: &str, outline: &str, fill: &str| {
        AnnotationClass::new(name, name, DEFAULT_OUTLINE_WIDTH, outline)
            .with_fill(fill, DEFAULT_FILL_OPACITY)
    };

    vec![
        filled("Tumor Cells", "#fff00000", "#ffffcccc"),
        filled("Inflammation", "#ffffb31a", "#ffffdd99"),
        filled("Connective/Fat", "#ffadad85", "#ffd6d6c2"),
        filled("Muscle", "#ff80bfff", "#ffcce6ff"),
        filled("Mucosa", "#ffcc66ff", "#ffeeccff"),
        filled("Mucus", "#ffff80ff", "#ffffccff"),
        AnnotationClass::new("Necrosis", "Necrosis", DEFAULT_OUTLINE_WIDTH, "#ff660000"),
    ]
}
