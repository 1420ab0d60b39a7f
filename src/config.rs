//! Configuration management for the `wsi-tiler` command line.
//!
//! This module provides:
//! - Command-line arguments via clap, one subcommand per operation
//! - Environment variables with `WSI_TILER_` prefix
//! - Defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use clap::Parser;
//! use wsi_tiler::config::{Cli, Command};
//!
//! match Cli::parse().command {
//!     Command::Plan(config) => println!("Planning {}", config.slide_info.display()),
//!     Command::Contours(config) => println!("Tracing {}", config.mask.display()),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `WSI_TILER_SLIDE_INFO` - Slide info JSON file for `plan`
//! - `WSI_TILER_TILE_PX` - Tile width in native pixels (default: 224)
//! - `WSI_TILER_TILE_WIDTH_UM` / `WSI_TILER_TILE_HEIGHT_UM` - Explicit tile size
//! - `WSI_TILER_MASK` - Label mask image for `contours`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::coords::{pixel_width_to_microns, NativeResolution};

// =============================================================================
// Default Values
// =============================================================================

/// Default tile width in native pixels (square patches).
pub const DEFAULT_TILE_PX: u32 = 224;

/// Default tile origin for `contours`.
pub const DEFAULT_ORIGIN: f64 = 0.0;

// =============================================================================
// CLI Arguments
// =============================================================================

/// wsi-tiler - tile planning and contour localization for whole slide images.
#[derive(Parser, Debug, Clone)]
#[command(name = "wsi-tiler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Split the ROIs of a slide into processing tiles.
    Plan(PlanConfig),

    /// Trace instance outlines in a label mask and place them on the slide.
    Contours(ContoursConfig),
}

// =============================================================================
// Plan Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct PlanConfig {
    /// Slide info JSON (frame, native_resolution, rois).
    #[arg(long, env = "WSI_TILER_SLIDE_INFO")]
    pub slide_info: PathBuf,

    /// Tile width in native pixels; the same count is used for both axes.
    #[arg(long, default_value_t = DEFAULT_TILE_PX, env = "WSI_TILER_TILE_PX")]
    pub tile_px: u32,

    /// Tile width in micrometers, overrides --tile-px.
    ///
    /// Must be given together with --tile-height-um.
    #[arg(long, env = "WSI_TILER_TILE_WIDTH_UM", requires = "tile_height_um")]
    pub tile_width_um: Option<f64>,

    /// Tile height in micrometers, overrides --tile-px.
    #[arg(long, env = "WSI_TILER_TILE_HEIGHT_UM", requires = "tile_width_um")]
    pub tile_height_um: Option<f64>,

    /// Tile the whole slide when the slide info carries no ROI.
    #[arg(long, default_value_t = false)]
    pub whole_slide_fallback: bool,

    /// Write the plan here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl PlanConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        match (self.tile_width_um, self.tile_height_um) {
            (Some(w), Some(h)) => {
                if !(w > 0.0 && h > 0.0) {
                    return Err(format!(
                        "tile size must be positive, got {}x{} um",
                        w, h
                    ));
                }
            }
            (None, None) => {
                if self.tile_px == 0 {
                    return Err("tile_px must be greater than 0".to_string());
                }
            }
            _ => {
                return Err(
                    "--tile-width-um and --tile-height-um must be given together".to_string(),
                )
            }
        }
        Ok(())
    }

    /// Tile size in micrometers for a slide of the given resolution.
    pub fn tile_size_um(&self, resolution: &NativeResolution) -> (f64, f64) {
        match (self.tile_width_um, self.tile_height_um) {
            (Some(w), Some(h)) => (w, h),
            _ => pixel_width_to_microns(self.tile_px, resolution),
        }
    }
}

// =============================================================================
// Contours Command
// =============================================================================

#[derive(Args, Debug, Clone)]
pub struct ContoursConfig {
    /// Label mask image (16-bit grayscale PNG or TIFF, 0 = background).
    #[arg(long, env = "WSI_TILER_MASK")]
    pub mask: PathBuf,

    /// Tile top-left x in slide micrometers.
    #[arg(long, default_value_t = DEFAULT_ORIGIN, allow_negative_numbers = true)]
    pub origin_x: f64,

    /// Tile top-left y in slide micrometers.
    #[arg(long, default_value_t = DEFAULT_ORIGIN, allow_negative_numbers = true)]
    pub origin_y: f64,

    /// Tile width in micrometers covered by the mask.
    #[arg(long)]
    pub tile_width_um: f64,

    /// Tile height in micrometers covered by the mask.
    #[arg(long)]
    pub tile_height_um: f64,

    /// Write the contours here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ContoursConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.tile_width_um > 0.0 && self.tile_height_um > 0.0) {
            return Err(format!(
                "tile size must be positive, got {}x{} um",
                self.tile_width_um, self.tile_height_um
            ));
        }
        if !(self.origin_x.is_finite() && self.origin_y.is_finite()) {
            return Err("tile origin must be finite".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
