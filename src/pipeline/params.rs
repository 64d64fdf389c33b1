//! Parameters for the shadow → mesh pipeline.
//!
//! Defaults: darkness cutoff 50, sun at 45° elevation and 135° azimuth,
//! regions of at least 100 pixels.

use crate::contours::DEFAULT_MIN_AREA_PIXELS;
use crate::error::{Result, ShadowMeshError};
use crate::inversion::DEFAULT_MIN_SHADOW_LENGTH_PX;
use crate::segment::DEFAULT_DARKNESS_THRESHOLD;
use crate::types::SunDirection;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineParams {
    /// Pixels strictly darker than this (0–255) are shadow candidates.
    pub darkness_threshold: u8,
    /// Sun elevation in radians, strictly inside (0, π/2).
    pub sun_elevation: f64,
    /// Sun azimuth in radians.
    pub sun_azimuth: f64,
    /// Regions smaller than this many pixels are ignored.
    pub min_area_pixels: usize,
    /// Rectangles whose longer side is below this many pixels are dropped.
    pub min_shadow_length_px: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            sun_elevation: FRAC_PI_4,
            sun_azimuth: 3.0 * FRAC_PI_4,
            min_area_pixels: DEFAULT_MIN_AREA_PIXELS,
            min_shadow_length_px: DEFAULT_MIN_SHADOW_LENGTH_PX,
        }
    }
}

impl PipelineParams {
    /// Validated sun position.
    pub fn sun(&self) -> Result<SunDirection> {
        SunDirection::new(self.sun_elevation, self.sun_azimuth)
    }

    pub fn validate(&self) -> Result<()> {
        self.sun()?;
        if !(self.min_shadow_length_px.is_finite() && self.min_shadow_length_px >= 0.0) {
            return Err(ShadowMeshError::configuration(format!(
                "min_shadow_length_px must be a non-negative number, got {}",
                self.min_shadow_length_px
            )));
        }
        Ok(())
    }
}
