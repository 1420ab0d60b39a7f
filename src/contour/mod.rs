//! Contour localization for instance segmentation output.
//!
//! A segmentation model returns a [`LabelMask`] per tile. [`extract_contours`]
//! turns it into one [`InstanceContour`] per instance, already placed in slide
//! micrometer coordinates and ready to become a polygon annotation.

mod extract;
mod mask;

pub use extract::{contour_area, extract_contours, InstanceContour, MIN_CONTOUR_POINTS};
pub use mask::{LabelBounds, LabelMask, BACKGROUND_LABEL};
