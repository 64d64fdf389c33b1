//! Shadow segmentation: dark-pixel thresholding followed by a morphological
//! opening.
//!
//! A pixel is shadow when its intensity is strictly below the darkness
//! threshold. The opening (erosion then dilation with a square structuring
//! element) removes speckle narrower than the element while restoring the
//! outline of every blob that survives the erosion. Speckle that does get
//! through is filtered later by region area, so the defaults lean towards
//! under-detection.
//!
//! Out-of-image neighbours are ignored by both passes: a blob touching the
//! border is not eroded from the outside.

mod morphology;

pub use morphology::{dilate, erode, open};

use crate::image::{BinaryMask, ImageView};
use log::debug;

/// Default cutoff on a 0–255 scale.
pub const DEFAULT_DARKNESS_THRESHOLD: u8 = 50;

/// Half-width of the default 3 × 3 structuring element.
pub const DEFAULT_OPENING_RADIUS: usize = 1;

/// Converts an intensity raster into a cleaned shadow mask.
#[derive(Clone, Copy, Debug)]
pub struct ShadowSegmenter {
    darkness_threshold: u8,
    opening_radius: usize,
}

impl Default for ShadowSegmenter {
    fn default() -> Self {
        Self::new(DEFAULT_DARKNESS_THRESHOLD)
    }
}

impl ShadowSegmenter {
    pub fn new(darkness_threshold: u8) -> Self {
        Self {
            darkness_threshold,
            opening_radius: DEFAULT_OPENING_RADIUS,
        }
    }

    /// Override the structuring element half-width (`0` disables the opening).
    pub fn with_opening_radius(mut self, radius: usize) -> Self {
        self.opening_radius = radius;
        self
    }

    pub fn darkness_threshold(&self) -> u8 {
        self.darkness_threshold
    }

    pub fn segment<I: ImageView<Pixel = u8>>(&self, image: &I) -> BinaryMask {
        let raw = threshold_below(image, self.darkness_threshold);
        let raw_count = raw.count();
        let mask = open(&raw, self.opening_radius);
        debug!(
            "ShadowSegmenter: {} dark pixels, {} after opening (threshold={})",
            raw_count,
            mask.count(),
            self.darkness_threshold
        );
        mask
    }
}

/// Threshold and open with the default 3 × 3 element.
pub fn segment<I: ImageView<Pixel = u8>>(image: &I, darkness_threshold: u8) -> BinaryMask {
    ShadowSegmenter::new(darkness_threshold).segment(image)
}

/// Mark every pixel strictly darker than `threshold`.
pub fn threshold_below<I: ImageView<Pixel = u8>>(image: &I, threshold: u8) -> BinaryMask {
    let (w, h) = (image.width(), image.height());
    let mut mask = BinaryMask::new(w, h);
    for (y, row) in image.rows().enumerate() {
        let start = y * w;
        for (dst, &v) in mask.data[start..start + w].iter_mut().zip(row) {
            *dst = v < threshold;
        }
    }
    mask
}
