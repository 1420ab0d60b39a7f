//! Annotation payloads submitted back to the slide service.
//!
//! - [`Annotation`] / [`AnnotationShape`]: geometry plus class name
//! - [`AnnotationClass`]: display style for a class of annotations
//! - [`face_annotation`]: template shape placed through the normalized mapper
//! - Class palettes used by the bundled pipelines

mod template;
mod types;

pub use template::{
    cell_class, colon_tissue_classes, face_annotation, face_class, CELL_CLASS, FACE_CLASS,
};
pub use types::{
    is_valid_argb_color, Annotation, AnnotationClass, AnnotationShape, DEFAULT_FILL_OPACITY,
    DEFAULT_OUTLINE_WIDTH,
};
