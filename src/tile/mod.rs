//! Tile planning layer.
//!
//! This module turns regions of interest into the fixed-size tiles that are
//! fetched from the slide service and fed to a model.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          Roi (Rectangle | Shape)        │
//! └────────────────────┬────────────────────┘
//!                      │ BoundingRect
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               plan_tiles                │
//! │   one TileGrid per ROI, row-major,      │
//! │   concatenated in ROI order             │
//! └────────────────────┬────────────────────┘
//!                      │ Vec<Tile>
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │      TileBatches (inference batches)    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`Roi`]: Tagged union of rectangle and arbitrary-shape ROIs
//! - [`BoundingRect`]: Capability used by the planner to size the grid
//! - [`plan_tiles`]: Main entry point producing the ordered tile list
//! - [`TileGrid`]: Iterator over the tiles of one ROI
//! - [`TileBatches`]: Fixed-size batching for model inference
//!
//! # Example
//!
//! ```
//! use wsi_tiler::coords::{pixel_width_to_microns, NativeResolution};
//! use wsi_tiler::tile::{plan_tiles, Roi};
//!
//! let resolution = NativeResolution::new(0.5, 0.5).unwrap();
//! let (tile_w, tile_h) = pixel_width_to_microns(224, &resolution);
//!
//! let rois = vec![Roi::rectangle(0.0, 0.0, 1000.0, 500.0)];
//! let tiles = plan_tiles(&rois, tile_w, tile_h).unwrap();
//!
//! // ceil(1000 / 112) * ceil(500 / 112)
//! assert_eq!(tiles.len(), 9 * 5);
//! ```

mod batch;
mod planner;
mod roi;

pub use batch::{batch_count, TileBatch, TileBatches};
pub use planner::{grid_dimensions, plan_tiles, Tile, TileGrid, TileSize, MAX_TILES};
pub use roi::{rois_or_whole_slide, BoundingRect, Roi, RoiShape, ShapeKind};
