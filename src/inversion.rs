//! Shadow → building inversion.
//!
//! A vertical edifice of height `H` under a sun at elevation `θ` casts a
//! shadow of length `H / tan θ` on flat ground. The inverter reads the shadow
//! length off the longer side of the fitted rectangle and inverts that
//! relation.
//!
//! The footprint is recovered with a fixed heuristic rather than an exact
//! inverse of the oblique projection: the detected rectangle is assumed to
//! span from the building's base to the shadow tip and to share the
//! footprint's orientation, so it is scaled to meters and shifted by half the
//! shadow length back towards the sun.
use crate::error::{Result, ShadowMeshError};
use crate::types::{Building, FootprintPolygon, OrientedRectangle, SunDirection};
use nalgebra::Point2;

/// Rectangles whose longer side is shorter than this (pixels) are rejected.
pub const DEFAULT_MIN_SHADOW_LENGTH_PX: f64 = 1e-6;

/// Building height implied by a shadow of `shadow_length_m` meters.
#[inline]
pub fn height_from_shadow(shadow_length_m: f64, elevation: f64) -> f64 {
    shadow_length_m * elevation.tan()
}

#[derive(Clone, Copy, Debug)]
pub struct GeometryInverter {
    sun: SunDirection,
    ground_sampling_distance: f64,
    min_shadow_length_px: f64,
}

impl GeometryInverter {
    pub fn new(sun: SunDirection, ground_sampling_distance: f64) -> Self {
        Self {
            sun,
            ground_sampling_distance,
            min_shadow_length_px: DEFAULT_MIN_SHADOW_LENGTH_PX,
        }
    }

    pub fn with_min_shadow_length_px(mut self, min_px: f64) -> Self {
        self.min_shadow_length_px = min_px;
        self
    }

    pub fn sun(&self) -> SunDirection {
        self.sun
    }

    pub fn invert(&self, rect: &OrientedRectangle) -> Result<Building> {
        let shadow_px = rect.longer_side();
        if !shadow_px.is_finite() || shadow_px < self.min_shadow_length_px {
            return Err(ShadowMeshError::degenerate(format!(
                "shadow length {shadow_px} px is below {} px",
                self.min_shadow_length_px
            )));
        }
        let gsd = self.ground_sampling_distance;
        let shadow_m = shadow_px * gsd;
        let height = height_from_shadow(shadow_m, self.sun.elevation());

        // Backwards along the shadow direction, i.e. towards the sun.
        let shift = -self.sun.shadow_direction() * (shadow_m * 0.5);
        let ring: Vec<Point2<f64>> = rect
            .corners()
            .iter()
            .map(|c| Point2::from(c.coords * gsd) + shift)
            .collect();

        let footprint = FootprintPolygon::new(ring)?;
        Building::new(footprint, height)
    }
}

/// One-shot inversion with the default degeneracy guard.
pub fn invert(
    rect: &OrientedRectangle,
    sun: SunDirection,
    ground_sampling_distance: f64,
) -> Result<Building> {
    GeometryInverter::new(sun, ground_sampling_distance).invert(rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn sun(elevation: f64, azimuth: f64) -> SunDirection {
        SunDirection::new(elevation, azimuth).unwrap()
    }

    #[test]
    fn square_shadow_at_forty_five_degrees() {
        let rect = OrientedRectangle::new(Point2::new(20.0, 20.0), 20.0, 20.0, 0.0);
        let building = invert(&rect, sun(FRAC_PI_4, 3.0 * FRAC_PI_4), 0.5).unwrap();
        assert!((building.height() - 10.0).abs() < 1e-9, "h={}", building.height());
        assert_eq!(building.footprint().len(), 4);
        assert!((building.footprint().area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn height_uses_longer_side() {
        let rect = OrientedRectangle::new(Point2::new(0.0, 0.0), 6.0, 30.0, 0.2);
        let building = invert(&rect, sun(FRAC_PI_4, 0.0), 1.0).unwrap();
        assert!((building.height() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn footprint_moves_half_length_towards_sun() {
        let rect = OrientedRectangle::new(Point2::new(40.0, 40.0), 8.0, 20.0, 0.0);
        let azimuth = 3.0 * FRAC_PI_4;
        let building = invert(&rect, sun(FRAC_PI_4, azimuth), 0.5).unwrap();
        let expected_shift = 20.0 * 0.5 * 0.5;
        let centroid = building.footprint().centroid();
        let dx = centroid.x - 20.0;
        let dy = centroid.y - 20.0;
        assert!((dx - expected_shift * azimuth.sin()).abs() < 1e-9);
        assert!((dy - expected_shift * azimuth.cos()).abs() < 1e-9);
    }

    #[test]
    fn height_grows_with_elevation() {
        let mut last = 0.0;
        for i in 1..40 {
            let elevation = FRAC_PI_2 * i as f64 / 40.0;
            let h = height_from_shadow(12.0, elevation);
            assert!(h > last, "h({elevation})={h} not above {last}");
            last = h;
        }
    }

    #[test]
    fn zero_length_shadow_is_degenerate() {
        let rect = OrientedRectangle::new(Point2::new(3.0, 3.0), 0.0, 0.0, 0.0);
        let err = invert(&rect, sun(FRAC_PI_4, 0.0), 0.5).unwrap_err();
        assert!(err.is_degenerate(), "{err}");
    }

    #[test]
    fn guard_length_is_configurable() {
        let rect = OrientedRectangle::new(Point2::new(3.0, 3.0), 2.0, 1.0, 0.0);
        let inverter =
            GeometryInverter::new(sun(FRAC_PI_4, 0.0), 1.0).with_min_shadow_length_px(5.0);
        assert!(inverter.invert(&rect).unwrap_err().is_degenerate());
    }
}
