//! Fixed-size batching of planned tiles for model inference.

use crate::error::TilingError;

use super::planner::Tile;

/// Number of batches needed for `tile_count` tiles, i.e. `ceil(n / batch_size)`.
pub fn batch_count(tile_count: usize, batch_size: usize) -> Result<usize, TilingError> {
    if batch_size == 0 {
        return Err(TilingError::InvalidBatchSize);
    }
    Ok(tile_count.div_ceil(batch_size))
}

/// A contiguous run of tiles processed together.
#[derive(Debug, Clone, Copy)]
pub struct TileBatch<'a> {
    /// Zero-based batch number
    pub index: usize,

    /// Position of `tiles[0]` in the full plan
    pub first_tile: usize,

    pub tiles: &'a [Tile],
}

/// Iterator over [`TileBatch`]es; only the last batch may be short.
#[derive(Debug, Clone)]
pub struct TileBatches<'a> {
    tiles: &'a [Tile],
    batch_size: usize,
    index: usize,
}

impl<'a> TileBatches<'a> {
    pub fn new(tiles: &'a [Tile], batch_size: usize) -> Result<Self, TilingError> {
        if batch_size == 0 {
            return Err(TilingError::InvalidBatchSize);
        }
        Ok(Self {
            tiles,
            batch_size,
            index: 0,
        })
    }

    /// Total number of batches, including those already yielded.
    pub fn total(&self) -> usize {
        self.tiles.len().div_ceil(self.batch_size)
    }
}

impl<'a> Iterator for TileBatches<'a> {
    type Item = TileBatch<'a>;

    fn next(&mut self) -> Option<TileBatch<'a>> {
        let first_tile = self.index * self.batch_size;
        if first_tile >= self.tiles.len() {
            return None;
        }
        let end = (first_tile + self.batch_size).min(self.tiles.len());

        let batch = TileBatch {
            index: self.index,
            first_tile,
            tiles: &self.tiles[first_tile..end],
        };
        self.index += 1;
        Some(batch)
    }
}
