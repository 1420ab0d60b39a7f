//! SlideService trait for talking to a remote slide service.
//!
//! The service owns the slide: it reports its geometry, serves image regions
//! and stores annotations along with their classes. Transport and authentication are left to the
//! implementation; the pipelines in [`crate::pipeline`] only see this trait.

use async_trait::async_trait;
use image::RgbImage;

use crate::annotation::{Annotation, AnnotationClass};
use crate::coords::{MicronPoint, NativeResolution};
use crate::error::ServiceError;
use crate::tile::Roi;

use super::info::SlideInfo;

/// Client side of a slide service session.
///
/// # Example
///
/// ```ignore
/// use wsi_tiler::slide::SlideService;
///
/// async fn first_tile<S: SlideService>(service: &S) -> Result<(), ServiceError> {
///     let info = service.slide_info().await?;
///     let image = service.native_region(info.frame.as_rect().top_left(), 224, 224).await?;
///     println!("{}x{}", image.width(), image.height());
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait SlideService: Send + Sync {
    /// Slide geometry and the ROIs attached to the slide.
    async fn slide_info(&self) -> Result<SlideInfo, ServiceError>;

    /// ROIs the user selected for the current analysis run.
    ///
    /// May be empty; callers decide whether to fall back to the whole slide.
    async fn analysis_rois(&self) -> Result<Vec<Roi>, ServiceError>;

    /// A region at native resolution, sized in pixels.
    async fn native_region(
        &self,
        top_left: MicronPoint,
        width_px: u32,
        height_px: u32,
    ) -> Result<RgbImage, ServiceError>;

    /// A region sized in micrometers, resampled to `resolution` um/pixel.
    async fn region(
        &self,
        top_left: MicronPoint,
        width_um: f64,
        height_um: f64,
        resolution: NativeResolution,
    ) -> Result<RgbImage, ServiceError>;

    /// Register annotation classes (styles) with the service.
    async fn add_annotation_classes(&self, classes: &[AnnotationClass])
        -> Result<(), ServiceError>;

    /// Submit annotations. The service assigns their ids.
    async fn add_annotations(&self, annotations: &[Annotation]) -> Result<(), ServiceError>;

    /// Stored annotations, filtered by shape type and class name.
    ///
    /// The shape type is an [`AnnotationShape::type_name`] such as
    /// `"Rectangle"`. A `None` or empty filter matches everything, see
    /// [`Annotation::matches`].
    ///
    /// [`AnnotationShape::type_name`]: crate::annotation::AnnotationShape::type_name
    async fn annotations(
        &self,
        shape_type: Option<&str>,
        class_name: Option<&str>,
    ) -> Result<Vec<Annotation>, ServiceError>;

    /// Replace a stored annotation, matched by id.
    ///
    /// Fails with [`ServiceError::Rejected`] when the annotation has no id
    /// and [`ServiceError::NotFound`] when the id is unknown.
    async fn update_annotation(&self, annotation: &Annotation) -> Result<(), ServiceError>;

    /// Annotation classes registered with the service.
    async fn annotation_classes(&self) -> Result<Vec<AnnotationClass>, ServiceError>;

    /// Replace a registered class, matched by name.
    ///
    /// Fails with [`ServiceError::NotFound`] when no class has that name.
    async fn update_annotation_class(&self, class: &AnnotationClass) -> Result<(), ServiceError>;
}
