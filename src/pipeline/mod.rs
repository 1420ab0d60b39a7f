//! Analysis pipelines.
//!
//! Both pipelines follow the same flow:
//!
//! ```text
//! slide info ──▶ tile size (um) ──▶ plan_tiles ──▶ for each tile / batch:
//!                                                    fetch region ─▶ model ─▶ annotations
//! ```
//!
//! - [`ClassificationPipeline`]: one label per tile, submitted as rectangles
//! - [`SegmentationPipeline`]: one outline per detected instance, submitted
//!   as polygons
//!
//! Models are plugged in through [`TileClassifier`] and [`InstanceSegmenter`].

mod classify;
mod segment;

pub use classify::{argmax, ClassificationPipeline, TileClassifier, DEFAULT_BATCH_SIZE};
pub use segment::{InstanceSegmenter, SegmentationPipeline, DEFAULT_INPUT_WIDTH_PX};

use serde::Serialize;
use tracing::warn;

use crate::annotation::AnnotationClass;
use crate::error::PipelineError;
use crate::tile::Roi;

/// Counts reported at the end of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub rois: usize,
    pub tiles: usize,
    pub annotations: usize,
}

/// Check every class before it is sent to the slide service.
pub(crate) fn validate_classes(classes: &[AnnotationClass]) -> Result<(), PipelineError> {
    for class in classes {
        class
            .validate()
            .map_err(|message| PipelineError::InvalidClass {
                name: class.name.clone(),
                message,
            })?;
    }
    Ok(())
}

/// Log the ROIs that will be tiled through their bounding rectangle.
pub fn warn_inexact_rois(rois: &[Roi]) {
    for (index, roi) in rois.iter().enumerate().filter(|(_, r)| !r.is_rectangular()) {
        warn!(
            "Tiling isn't exact for ROI {} of type '{}': using its bounding rectangle",
            index,
            roi.kind_name()
        );
    }
}
