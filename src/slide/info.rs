//! Slide metadata as reported by the slide service.

use serde::{Deserialize, Serialize};

use crate::coords::{NativeResolution, SlideFrame};
use crate::error::GeometryError;
use crate::tile::Roi;

/// Geometry of one slide plus the ROIs attached to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideInfo {
    /// Physical extent of the slide
    pub frame: SlideFrame,

    /// Micrometers per pixel of the base layer
    pub native_resolution: NativeResolution,

    /// Regions of interest; may be empty
    #[serde(default)]
    pub rois: Vec<Roi>,
}

impl SlideInfo {
    /// Check frame and resolution invariants.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.frame.validate()?;
        self.native_resolution.validate()
    }
}
