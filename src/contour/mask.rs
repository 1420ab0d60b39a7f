//! Instance label masks.

use std::collections::BTreeMap;
use std::path::Path;

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

use crate::error::MaskError;

/// Label value of pixels that belong to no instance.
pub const BACKGROUND_LABEL: u32 = 0;

/// A 2D instance mask: each pixel holds the label of the object it belongs to.
///
/// Labels are stored row-major. `0` is background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMask {
    width: u32,
    height: u32,
    labels: Vec<u32>,
}

/// Inclusive pixel bounds of one label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelBounds {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl LabelBounds {
    fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

impl LabelMask {
    /// Wrap a row-major label buffer.
    pub fn new(width: u32, height: u32, labels: Vec<u32>) -> Result<Self, MaskError> {
        let expected = width as usize * height as usize;
        if labels.len() != expected {
            return Err(MaskError::DimensionMismatch {
                width,
                height,
                expected,
                actual: labels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            labels,
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> u32,
    {
        let mut labels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                labels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            labels,
        }
    }

    /// Labels from a 16-bit grayscale image, the usual on-disk mask format.
    pub fn from_luma16(image: &ImageBuffer<Luma<u16>, Vec<u16>>) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            u32::from(image.get_pixel(x, y).0[0])
        })
    }

    /// Labels from an 8-bit grayscale image.
    pub fn from_luma8(image: &GrayImage) -> Self {
        Self::from_fn(image.width(), image.height(), |x, y| {
            u32::from(image.get_pixel(x, y).0[0])
        })
    }

    /// Labels from a decoded grayscale image, values taken as they are.
    ///
    /// Color and float images are rejected: converting them to gray would
    /// rescale labels or merge different labels of equal luminance.
    pub fn from_image(image: &DynamicImage) -> Result<Self, MaskError> {
        match image {
            DynamicImage::ImageLuma8(gray) => Ok(Self::from_luma8(gray)),
            DynamicImage::ImageLuma16(gray) => Ok(Self::from_luma16(gray)),
            other => Err(MaskError::Image(format!(
                "unsupported pixel format {:?}, expected 8 or 16-bit grayscale",
                other.color()
            ))),
        }
    }

    /// Read a mask image (PNG or TIFF) from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MaskError> {
        let image = image::open(path).map_err(|e| MaskError::Image(e.to_string()))?;
        Self::from_image(&image)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.labels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Bounds of every non-background label, in ascending label order.
    pub fn label_bounds(&self) -> BTreeMap<u32, LabelBounds> {
        let mut bounds: BTreeMap<u32, LabelBounds> = BTreeMap::new();
        if self.width == 0 {
            return bounds;
        }

        for (i, &label) in self.labels.iter().enumerate() {
            if label == BACKGROUND_LABEL {
                continue;
            }
            let x = (i % self.width as usize) as u32;
            let y = (i / self.width as usize) as u32;
            bounds
                .entry(label)
                .and_modify(|b| b.include(x, y))
                .or_insert_with(|| LabelBounds::at(x, y));
        }

        bounds
    }
}
