//! Slide coordinate spaces.
//!
//! Three spaces are in play when annotating a slide:
//!
//! ```text
//!   normalized [0,1]  ──(SlideFrame)──▶  slide micrometers  ◀──(PixelScale)──  tile pixels
//! ```
//!
//! - [`SlideFrame`] and [`NativeResolution`] come from the slide service
//! - The mapper functions convert between the spaces
//! - [`PixelScale`] relates a retrieved tile raster to the tile's micron extent

mod frame;
mod mapper;

pub use frame::{MicronPoint, MicronRect, NativeResolution, NormalizedPoint, SlideFrame};
pub use mapper::{
    microns_to_normalized_point, normalized_height_to_microns, normalized_path_to_microns,
    normalized_point_to_microns, normalized_width_to_microns, pixel_size_to_microns,
    pixel_width_to_microns, tile_pixel_to_micron, transform_normalized_path, PixelScale,
};

pub(crate) use frame::is_positive;
