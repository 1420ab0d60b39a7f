//! # WSI Tiler
//!
//! Tile planning and coordinate mapping for analysis plugins working on
//! Whole Slide Images (WSI).
//!
//! Slides are addressed in micrometers. This library splits regions of
//! interest into model-sized tiles, maps between normalized, micrometer and
//! tile-pixel coordinates, and turns instance masks back into slide-space
//! polygons that can be submitted as annotations.
//!
//! ## Features
//!
//! - **Coordinate mapping**: Normalized window, micrometer and tile-pixel spaces
//! - **Tile planning**: Row-major tile grids over rectangle and shape ROIs
//! - **Contour localization**: One outline per instance of a label mask
//! - **Pipelines**: Batched tile classification and tile-by-tile segmentation
//!   against a pluggable slide service
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`coords`] - Slide frame, resolution and coordinate mappers
//! - [`tile`] - ROIs, tile planner and inference batches
//! - [`contour`] - Label masks and contour extraction
//! - [`annotation`] - Annotation shapes, classes and templates
//! - [`slide`] - Slide service trait and slide metadata
//! - [`pipeline`] - Classification and segmentation pipelines
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust
//! use wsi_tiler::{plan_tiles, pixel_width_to_microns, NativeResolution, Roi};
//!
//! let resolution = NativeResolution::new(0.25, 0.25).unwrap();
//! let (tile_w, tile_h) = pixel_width_to_microns(512, &resolution);
//!
//! let rois = vec![Roi::rectangle(1000.0, 1000.0, 300.0, 200.0)];
//! let tiles = plan_tiles(&rois, tile_w, tile_h).unwrap();
//!
//! assert_eq!(tiles.len(), 3 * 2);
//! assert_eq!(tiles[0].top_left.x, 1000.0);
//! ```

pub mod annotation;
pub mod config;
pub mod contour;
pub mod coords;
pub mod error;
pub mod pipeline;
pub mod slide;
pub mod tile;

// Re-export commonly used types
pub use annotation::{
    cell_class, colon_tissue_classes, face_annotation, face_class, Annotation, AnnotationClass,
    AnnotationShape,
};
pub use config::{Cli, Command, ContoursConfig, PlanConfig};
pub use contour::{extract_contours, InstanceContour, LabelMask};
pub use coords::{
    microns_to_normalized_point, normalized_height_to_microns, normalized_path_to_microns,
    normalized_point_to_microns, normalized_width_to_microns, pixel_size_to_microns,
    pixel_width_to_microns, tile_pixel_to_micron, transform_normalized_path, MicronPoint,
    MicronRect, NativeResolution, NormalizedPoint, PixelScale, SlideFrame,
};
pub use error::{GeometryError, MaskError, PipelineError, ServiceError, TilingError};
pub use pipeline::{
    ClassificationPipeline, InstanceSegmenter, RunSummary, SegmentationPipeline, TileClassifier,
};
pub use slide::{SlideInfo, SlideService};
pub use tile::{plan_tiles, rois_or_whole_slide, BoundingRect, Roi, Tile, TileBatches};
