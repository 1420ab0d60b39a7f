//! ROI to tile decomposition.
//!
//! Each ROI's bounding rectangle is covered by a grid of same-size tiles,
//! emitted in row-major order starting at the rectangle's top-left corner:
//!
//! ```text
//!   (x0, y0)
//!      ┌──────┬──────┬──────┐
//!      │  0   │  1   │  2   │
//!      ├──────┼──────┼──────┤      tiles_x = ceil(w / tile_w)
//!      │  3   │  4   │  5   │      tiles_y = ceil(h / tile_h)
//!      ├──────┼──────┼──────┤
//!      │  6   │  7   │  8 ┄┄┼┄┄ ROI edge (last row/column may overhang)
//!      └──────┴──────┴──────┘
//! ```
//!
//! Tiles are never clipped: the last row and column may extend past the ROI.
//! Tiles from several ROIs are concatenated in ROI order without any
//! deduplication, so overlapping ROIs produce overlapping tiles.

use serde::{Deserialize, Serialize};

use crate::coords::{is_positive, MicronPoint, MicronRect};
use crate::error::TilingError;

use super::roi::BoundingRect;

// =============================================================================
// Tile
// =============================================================================

/// One processing tile in slide micrometer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub top_left: MicronPoint,
    pub bottom_right: MicronPoint,

    /// Index of the ROI this tile was planned for
    pub roi_index: usize,

    /// Grid row within the ROI (0 = top)
    pub row: u32,

    /// Grid column within the ROI (0 = left)
    pub col: u32,
}

impl Tile {
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    pub fn rect(&self) -> MicronRect {
        MicronRect::new(self.top_left.x, self.top_left.y, self.width(), self.height())
    }
}

// =============================================================================
// Tile Size
// =============================================================================

/// A validated tile size in micrometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSize {
    width: f64,
    height: f64,
}

impl TileSize {
    /// Reject zero, negative and non-finite sizes.
    ///
    /// A zero size would otherwise make the grid dimensions unbounded.
    pub fn new(width: f64, height: f64) -> Result<Self, TilingError> {
        if is_positive(width) && is_positive(height) {
            Ok(Self { width, height })
        } else {
            Err(TilingError::InvalidTileSize { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

/// Upper bound on the number of tiles in one plan.
pub const MAX_TILES: u64 = 10_000_000;

/// Number of tiles needed to cover `rect`, as `(tiles_x, tiles_y)`.
///
/// A degenerate (zero or negative) extent on either axis needs no tiles.
///
/// # Errors
///
/// Returns [`TilingError::TooManyTiles`] when the grid holds more than
/// [`MAX_TILES`] tiles, including infinite extents.
pub fn grid_dimensions(rect: &MicronRect, size: TileSize) -> Result<(u32, u32), TilingError> {
    let tiles_x = tiles_along(rect.width, size.width);
    let tiles_y = tiles_along(rect.height, size.height);
    if tiles_x == 0.0 || tiles_y == 0.0 {
        return Ok((0, 0));
    }

    let count = tiles_x * tiles_y;
    if !(count <= MAX_TILES as f64) {
        return Err(TilingError::TooManyTiles {
            count,
            limit: MAX_TILES,
        });
    }
    // Both factors are at least 1, so each fits under MAX_TILES.
    Ok((tiles_x as u32, tiles_y as u32))
}

fn tiles_along(extent: f64, tile: f64) -> f64 {
    if extent > 0.0 {
        (extent / tile).ceil()
    } else {
        0.0
    }
}

// =============================================================================
// Tile Grid
// =============================================================================

/// Row-major iterator over the tiles covering one ROI.
///
/// Each tile is computed from its grid index, so there is no running corner
/// that accumulates floating-point error across a row.
#[derive(Debug, Clone)]
pub struct TileGrid {
    roi_index: usize,
    origin: MicronPoint,
    size: TileSize,
    tiles_x: u32,
    tiles_y: u32,
    next: u64,
}

impl TileGrid {
    pub fn new(roi_index: usize, rect: &MicronRect, size: TileSize) -> Result<Self, TilingError> {
        let (tiles_x, tiles_y) = grid_dimensions(rect, size)?;
        Ok(Self {
            roi_index,
            origin: rect.top_left(),
            size,
            tiles_x,
            tiles_y,
            next: 0,
        })
    }

    /// `(tiles_x, tiles_y)` of the full grid.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.tiles_x, self.tiles_y)
    }

    fn total(&self) -> u64 {
        u64::from(self.tiles_x) * u64::from(self.tiles_y)
    }

    fn tile_at(&self, row: u32, col: u32) -> Tile {
        let x = self.origin.x + f64::from(col) * self.size.width;
        let y = self.origin.y + f64::from(row) * self.size.height;
        Tile {
            top_left: MicronPoint::new(x, y),
            bottom_right: MicronPoint::new(x + self.size.width, y + self.size.height),
            roi_index: self.roi_index,
            row,
            col,
        }
    }
}

impl Iterator for TileGrid {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.total() {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let row = (index / u64::from(self.tiles_x)) as u32;
        let col = (index % u64::from(self.tiles_x)) as u32;
        Some(self.tile_at(row, col))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.total() - self.next).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Decompose ROIs into a flat, ordered list of tiles.
///
/// # Errors
///
/// Returns [`TilingError::InvalidTileSize`] if either tile dimension is not a
/// positive finite number. This is checked before looking at the ROIs, so an
/// empty ROI list with a bad size still fails.
///
/// Returns [`TilingError::TooManyTiles`] if the ROIs together need more than
/// [`MAX_TILES`] tiles; nothing is allocated for the tiles in that case.
///
/// # Example
///
/// ```
/// use wsi_tiler::tile::{plan_tiles, Roi};
///
/// let rois = [Roi::rectangle(0.0, 0.0, 10.0, 10.0)];
/// let tiles = plan_tiles(&rois, 4.0, 4.0).unwrap();
///
/// assert_eq!(tiles.len(), 9);
/// assert_eq!((tiles[8].top_left.x, tiles[8].top_left.y), (8.0, 8.0));
/// ```
pub fn plan_tiles<R: BoundingRect>(
    rois: &[R],
    tile_width_um: f64,
    tile_height_um: f64,
) -> Result<Vec<Tile>, TilingError> {
    let size = TileSize::new(tile_width_um, tile_height_um)?;

    let mut grids = Vec::with_capacity(rois.len());
    let mut total: u64 = 0;
    for (index, roi) in rois.iter().enumerate() {
        let grid = TileGrid::new(index, &roi.bounding_rect(), size)?;
        total += grid.total();
        if total > MAX_TILES {
            return Err(TilingError::TooManyTiles {
                count: total as f64,
                limit: MAX_TILES,
            });
        }
        grids.push(grid);
    }

    Ok(grids.into_iter().flatten().collect())
}

// =============================================================================
// Tests
// =============================================================================
