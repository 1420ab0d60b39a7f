use thiserror::Error;

/// Errors raised when building slide geometry from service metadata
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Slide frame with a non-positive or non-finite extent
    #[error("Invalid slide frame: width and height must be > 0, got {width}x{height}")]
    InvalidFrame { width: f64, height: f64 },

    /// Native resolution with a non-positive or non-finite axis
    #[error("Invalid native resolution: um/pixel must be > 0, got {width}x{height}")]
    InvalidResolution { width: f64, height: f64 },
}

/// Errors raised by the tile planner
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TilingError {
    /// Tile width or height is zero, negative, or not finite
    #[error("Invalid tile size: {width}x{height} um (both dimensions must be > 0)")]
    InvalidTileSize { width: f64, height: f64 },

    /// Batch size of zero
    #[error("Invalid batch size: must be greater than 0")]
    InvalidBatchSize,

    /// The plan would hold more tiles than the planner accepts
    #[error("Too many tiles: {count} exceeds the limit of {limit}")]
    TooManyTiles { count: f64, limit: u64 },
}

/// Errors related to instance label masks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaskError {
    /// Label buffer length does not match width * height
    #[error("Mask dimension mismatch: {width}x{height} needs {expected} labels, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Mask image could not be read
    #[error("Failed to read mask image: {0}")]
    Image(String),
}

/// Errors reported by a slide service implementation
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Requested slide or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The service refused the request (bad region, unknown class, ...)
    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// Errors that abort an analysis pipeline run
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Slide service call failed
    #[error("Slide service error: {0}")]
    Service(#[from] ServiceError),

    /// Tile planning failed
    #[error("Tiling error: {0}")]
    Tiling(#[from] TilingError),

    /// Slide metadata is unusable
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Segmentation model produced an unusable mask
    #[error("Mask error: {0}")]
    Mask(#[from] MaskError),

    /// An annotation class fails validation (name, colors, opacity)
    #[error("Invalid annotation class '{name}': {message}")]
    InvalidClass { name: String, message: String },

    /// Model inference failed
    #[error("Model error: {0}")]
    Model(String),

    /// No ROI, or every ROI produced zero tiles
    #[error("ROI absent or too small: no tiles to process")]
    NoTiles,

    /// Classifier returned a result that does not match its label set
    #[error("Invalid classifier output for tile {tile}: {message}")]
    InvalidScores { tile: usize, message: String },
}
