//! Instance segmentation pipeline.
//!
//! Tiles are fetched by micrometer extent, segmented into a label mask, and
//! every detected instance becomes a polygon annotation of a single class.

use async_trait::async_trait;
use image::RgbImage;
use tracing::{debug, info, warn};

use crate::annotation::{cell_class, Annotation, AnnotationClass};
use crate::contour::{extract_contours, LabelMask};
use crate::coords::{pixel_width_to_microns, PixelScale};
use crate::error::PipelineError;
use crate::slide::SlideService;
use crate::tile::{plan_tiles, rois_or_whole_slide};

use super::{validate_classes, warn_inexact_rois, RunSummary};

/// Default tile width fed to the segmentation model, in native pixels.
pub const DEFAULT_INPUT_WIDTH_PX: u32 = 2048;

/// A model that labels every pixel of an image with an instance id.
#[async_trait]
pub trait InstanceSegmenter: Send + Sync {
    /// Instance mask for `image`; `0` marks background.
    async fn segment(&self, image: &RgbImage) -> Result<LabelMask, PipelineError>;
}

/// Tile-by-tile instance segmentation against a [`SlideService`].
pub struct SegmentationPipeline<M: InstanceSegmenter> {
    segmenter: M,
    input_width_px: u32,

    /// Multiplier applied to the native resolution when fetching tiles
    scale_factor: f64,

    class: AnnotationClass,
}

impl<M: InstanceSegmenter> SegmentationPipeline<M> {
    pub fn new(segmenter: M, input_width_px: u32) -> Self {
        Self {
            segmenter,
            input_width_px,
            scale_factor: 1.0,
            class: cell_class(),
        }
    }

    /// Fetch tiles at `native resolution * scale_factor` um/pixel.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Class assigned to every detected instance.
    pub fn with_class(mut self, class: AnnotationClass) -> Self {
        self.class = class;
        self
    }

    /// Segment every tile of the analysis ROIs, or of the whole slide when the
    /// user selected none.
    ///
    /// Tiles whose mask comes back with a zero dimension are skipped.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidClass`] if the instance class is malformed
    /// - [`PipelineError::Geometry`] if the fetch resolution is not positive
    /// - Any service, model or tiling error
    pub async fn run<S: SlideService>(&self, service: &S) -> Result<RunSummary, PipelineError> {
        validate_classes(std::slice::from_ref(&self.class))?;

        let slide = service.slide_info().await?;
        slide.validate()?;

        let fetch_resolution = slide.native_resolution.scaled(self.scale_factor);
        fetch_resolution.validate()?;

        let rois = service.analysis_rois().await?;
        if rois.is_empty() {
            info!("No analysis ROI selected, processing the whole slide");
        }
        let rois = rois_or_whole_slide(rois, &slide.frame);
        warn_inexact_rois(&rois);

        let (tile_width, tile_height) =
            pixel_width_to_microns(self.input_width_px, &slide.native_resolution);
        let tiles = plan_tiles(&rois, tile_width, tile_height)?;
        info!("{} ROI(s) split into {} tiles", rois.len(), tiles.len());

        service
            .add_annotation_classes(std::slice::from_ref(&self.class))
            .await?;

        let mut annotations_added = 0;
        for (index, tile) in tiles.iter().enumerate() {
            debug!("Tile {} of {}: segmenting", index + 1, tiles.len());

            let image = service
                .region(tile.top_left, tile_width, tile_height, fetch_resolution)
                .await?;
            let mask = self.segmenter.segment(&image).await?;

            if mask.width() == 0 || mask.height() == 0 {
                warn!("Tile {} of {}: empty mask, skipping", index + 1, tiles.len());
                continue;
            }

            let scale = PixelScale::from_tile(tile_width, tile_height, mask.width(), mask.height());
            let annotations: Vec<Annotation> =
                extract_contours(&mask, tile.top_left, scale.x, scale.y)
                    .iter()
                    .map(|contour| Annotation::from_contour(contour, self.class.name.as_str()))
                    .collect();

            debug!(
                "Tile {} of {}: {} instances",
                index + 1,
                tiles.len(),
                annotations.len()
            );
            if !annotations.is_empty() {
                service.add_annotations(&annotations).await?;
                annotations_added += annotations.len();
            }
        }

        info!(
            "Segmentation finished: {} annotations over {} tiles",
            annotations_added,
            tiles.len()
        );

        Ok(RunSummary {
            rois: rois.len(),
            tiles: tiles.len(),
            annotations: annotations_added,
        })
    }
}
