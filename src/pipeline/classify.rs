//! Tile classification pipeline.
//!
//! Every planned tile is fetched at native resolution as a square patch,
//! classified in batches, and annotated with a rectangle carrying the label
//! with the highest score.

use async_trait::async_trait;
use image::RgbImage;
use tracing::{debug, info};

use crate::annotation::{Annotation, AnnotationClass, DEFAULT_OUTLINE_WIDTH};
use crate::coords::pixel_width_to_microns;
use crate::error::PipelineError;
use crate::slide::SlideService;
use crate::tile::{plan_tiles, TileBatches};

use super::{validate_classes, warn_inexact_rois, RunSummary};

/// Default number of tiles per inference batch.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Outline color for classes generated from bare labels.
const DEFAULT_LABEL_COLOR: &str = "#ff909090";

/// A model that assigns one of a fixed set of labels to image patches.
#[async_trait]
pub trait TileClassifier: Send + Sync {
    /// Label names, in the order of the score vectors returned by
    /// [`TileClassifier::classify`].
    fn labels(&self) -> &[String];

    /// Score every image of the batch; one score vector per image.
    async fn classify(&self, batch: &[RgbImage]) -> Result<Vec<Vec<f32>>, PipelineError>;
}

/// Index of the highest score; the first one wins ties.
///
/// Returns `None` for an empty slice or when every score is NaN.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &score)| match best {
            Some((_, best_score)) if score <= best_score || score.is_nan() => best,
            None if score.is_nan() => None,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

/// Batched tile classification against a [`SlideService`].
///
/// # Example
///
/// ```ignore
/// let pipeline = ClassificationPipeline::new(model, 224).with_batch_size(32);
/// let summary = pipeline.run(&service).await?;
/// println!("{} tiles classified", summary.tiles);
/// ```
pub struct ClassificationPipeline<C: TileClassifier> {
    classifier: C,
    patch_width_px: u32,
    batch_size: usize,
    classes: Vec<AnnotationClass>,
}

impl<C: TileClassifier> ClassificationPipeline<C> {
    /// Create a pipeline with one outline-only class per classifier label.
    pub fn new(classifier: C, patch_width_px: u32) -> Self {
        let classes = classifier
            .labels()
            .iter()
            .map(|label| {
                AnnotationClass::new(label, label, DEFAULT_OUTLINE_WIDTH, DEFAULT_LABEL_COLOR)
            })
            .collect();

        Self {
            classifier,
            patch_width_px,
            batch_size: DEFAULT_BATCH_SIZE,
            classes,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Replace the classes registered before annotating.
    pub fn with_classes(mut self, classes: Vec<AnnotationClass>) -> Self {
        self.classes = classes;
        self
    }

    /// Classify every tile of the slide's ROIs.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::NoTiles`] if the slide has no ROI or the ROIs are empty
    /// - [`PipelineError::InvalidClass`] if a configured class is malformed
    /// - [`PipelineError::InvalidScores`] if the classifier output does not
    ///   match the batch or the label set
    /// - Any service, geometry or tiling error
    pub async fn run<S: SlideService>(&self, service: &S) -> Result<RunSummary, PipelineError> {
        validate_classes(&self.classes)?;

        let slide = service.slide_info().await?;
        slide.validate()?;

        let (tile_width, tile_height) =
            pixel_width_to_microns(self.patch_width_px, &slide.native_resolution);
        debug!(
            "Patch of {} px is {:.2} x {:.2} um",
            self.patch_width_px, tile_width, tile_height
        );

        warn_inexact_rois(&slide.rois);
        let tiles = plan_tiles(&slide.rois, tile_width, tile_height)?;
        info!("{} ROI(s) split into {} tiles", slide.rois.len(), tiles.len());

        if tiles.is_empty() {
            return Err(PipelineError::NoTiles);
        }

        service.add_annotation_classes(&self.classes).await?;

        let batches = TileBatches::new(&tiles, self.batch_size)?;
        let total_batches = batches.total();
        info!(
            "Start classification: {} batches of {} tiles",
            total_batches, self.batch_size
        );

        let labels = self.classifier.labels();
        let mut annotations_added = 0;

        for batch in batches {
            debug!("Batch {} of {}: retrieving tiles", batch.index + 1, total_batches);
            let mut images = Vec::with_capacity(batch.tiles.len());
            for tile in batch.tiles {
                let image = service
                    .native_region(tile.top_left, self.patch_width_px, self.patch_width_px)
                    .await?;
                images.push(image);
            }

            debug!("Batch {} of {}: classifying tiles", batch.index + 1, total_batches);
            let scores = self.classifier.classify(&images).await?;
            if scores.len() != batch.tiles.len() {
                return Err(PipelineError::InvalidScores {
                    tile: batch.first_tile,
                    message: format!(
                        "expected {} score vectors, got {}",
                        batch.tiles.len(),
                        scores.len()
                    ),
                });
            }

            let annotations = batch
                .tiles
                .iter()
                .zip(&scores)
                .enumerate()
                .map(|(offset, (tile, tile_scores))| -> Result<Annotation, PipelineError> {
                    let tile_index = batch.first_tile + offset;
                    let label = argmax(tile_scores)
                        .and_then(|i| labels.get(i))
                        .ok_or_else(|| PipelineError::InvalidScores {
                            tile: tile_index,
                            message: format!(
                                "{} scores for {} labels",
                                tile_scores.len(),
                                labels.len()
                            ),
                        })?;
                    Ok(Annotation::from_tile(tile, label.as_str()))
                })
                .collect::<Result<Vec<_>, _>>()?;

            service.add_annotations(&annotations).await?;
            annotations_added += annotations.len();
        }

        info!("Classification finished: {} tiles processed", tiles.len());

        Ok(RunSummary {
            rois: slide.rois.len(),
            tiles: tiles.len(),
            annotations: annotations_added,
        })
    }
}
