//! Owned single-channel intensity raster with its ground sampling distance.
//!
//! Row 0 is the first scan line. Pixel `(x, y)` covers the ground square
//! `[x, x+1] × [y, y+1]` scaled by `ground_sampling_distance`; any geographic
//! origin offset is the caller's business.
use super::ImageView;
use crate::error::{Result, ShadowMeshError};

#[derive(Clone, Debug)]
pub struct IntensityImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
    ground_sampling_distance: f64,
}

impl IntensityImage {
    /// Build from a tightly packed row-major buffer.
    ///
    /// Fails with [`ShadowMeshError::Input`] when the buffer length does not
    /// match `width * height` or the sampling distance is not a positive
    /// finite number of meters per pixel.
    pub fn new(
        width: usize,
        height: usize,
        data: Vec<u8>,
        ground_sampling_distance: f64,
    ) -> Result<Self> {
        if data.len() != width * height {
            return Err(ShadowMeshError::input(format!(
                "expected {} pixels for a {width}x{height} image, got {}",
                width * height,
                data.len()
            )));
        }
        if !ground_sampling_distance.is_finite() || ground_sampling_distance <= 0.0 {
            return Err(ShadowMeshError::input(format!(
                "ground sampling distance must be positive, got {ground_sampling_distance}"
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            ground_sampling_distance,
        })
    }

    /// Uniform image, handy for synthetic scenes.
    pub fn filled(width: usize, height: usize, value: u8, gsd: f64) -> Result<Self> {
        Self::new(width, height, vec![value; width * height], gsd)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Meters of ground covered by one pixel edge.
    pub fn ground_sampling_distance(&self) -> f64 {
        self.ground_sampling_distance
    }
}

impl ImageView for IntensityImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_sampling_distance() {
        for gsd in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = IntensityImage::filled(4, 4, 0, gsd).unwrap_err();
            assert!(matches!(err, ShadowMeshError::Input { .. }), "gsd={gsd}");
        }
    }

    #[test]
    fn rows_follow_buffer_layout() {
        let img = IntensityImage::new(3, 2, vec![1, 2, 3, 4, 5, 6], 0.5).unwrap();
        assert_eq!(img.row(1), &[4, 5, 6]);
        assert_eq!(img.rows().count(), 2);
    }
}
