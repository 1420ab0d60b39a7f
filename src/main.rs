//! wsi-tiler - tile planning and contour localization for whole slide images.
//!
//! This binary exposes the planner and the contour extractor on JSON files.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsi_tiler::{
    config::{Cli, Command, ContoursConfig, PlanConfig},
    contour::{extract_contours, InstanceContour, LabelMask},
    coords::{MicronPoint, PixelScale},
    pipeline::warn_inexact_rois,
    slide::SlideInfo,
    tile::{plan_tiles, rois_or_whole_slide, Tile},
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan(config) => run_plan(config),
        Command::Contours(config) => run_contours(config),
    }
}

// =============================================================================
// Plan Command
// =============================================================================

#[derive(Serialize)]
struct PlanOutput {
    tile_width_um: f64,
    tile_height_um: f64,
    roi_count: usize,
    tiles: Vec<Tile>,
}

fn run_plan(config: PlanConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let slide = match read_slide_info(&config.slide_info) {
        Ok(slide) => slide,
        Err(e) => {
            error!("Failed to load slide info: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let rois = if config.whole_slide_fallback {
        if slide.rois.is_empty() {
            info!("No ROI in slide info, tiling the whole slide");
        }
        rois_or_whole_slide(slide.rois, &slide.frame)
    } else {
        slide.rois
    };

    warn_inexact_rois(&rois);

    let (tile_width_um, tile_height_um) = config.tile_size_um(&slide.native_resolution);
    debug!("Tile size: {:.3} x {:.3} um", tile_width_um, tile_height_um);

    let tiles = match plan_tiles(&rois, tile_width_um, tile_height_um) {
        Ok(tiles) => tiles,
        Err(e) => {
            error!("Tiling failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("{} ROI(s) split into {} tiles", rois.len(), tiles.len());
    if tiles.is_empty() {
        warn!("Nothing to process: ROI absent or too small");
    }

    let output = PlanOutput {
        tile_width_um,
        tile_height_um,
        roi_count: rois.len(),
        tiles,
    };
    write_json(&output, config.output.as_deref())
}

fn read_slide_info(path: &Path) -> Result<SlideInfo, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let slide: SlideInfo =
        serde_json::from_str(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    slide.validate().map_err(|e| e.to_string())?;
    Ok(slide)
}

// =============================================================================
// Contours Command
// =============================================================================

#[derive(Serialize)]
struct ContoursOutput {
    mask_width: u32,
    mask_height: u32,
    scale: PixelScale,
    contours: Vec<InstanceContour>,
}

fn run_contours(config: ContoursConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let mask = match LabelMask::open(&config.mask) {
        Ok(mask) => mask,
        Err(e) => {
            error!("{}: {}", config.mask.display(), e);
            return ExitCode::FAILURE;
        }
    };

    if mask.width() == 0 || mask.height() == 0 {
        error!("{}: mask is empty", config.mask.display());
        return ExitCode::FAILURE;
    }

    let scale = PixelScale::from_tile(
        config.tile_width_um,
        config.tile_height_um,
        mask.width(),
        mask.height(),
    );
    let origin = MicronPoint::new(config.origin_x, config.origin_y);
    let contours = extract_contours(&mask, origin, scale.x, scale.y);

    info!(
        "{} instance contour(s) in {}x{} mask",
        contours.len(),
        mask.width(),
        mask.height()
    );

    let output = ContoursOutput {
        mask_width: mask.width(),
        mask_height: mask.height(),
        scale,
        contours,
    };
    write_json(&output, config.output.as_deref())
}

// =============================================================================
// Helpers
// =============================================================================

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so JSON on stdout stays clean.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "wsi_tiler=debug"
    } else {
        "wsi_tiler=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> ExitCode {
    let json = match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize output: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, json) {
                error!("Failed to write {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
            info!("Wrote {}", path.display());
        }
        None => println!("{}", json),
    }

    ExitCode::SUCCESS
}
