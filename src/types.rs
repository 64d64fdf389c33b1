//! Value types passed between the pipeline stages.
use crate::error::{Result, ShadowMeshError};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// Sun position above the ground plane.
///
/// `elevation` is measured from the horizon (0) towards the zenith (π/2) and
/// must lie strictly between the two. `azimuth` is measured from the ground
/// `y` axis towards `x`, so the unit vector pointing at the sun is
/// `(sin(azimuth), cos(azimuth))`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SunDirection {
    elevation: f64,
    azimuth: f64,
}

impl SunDirection {
    pub fn new(elevation: f64, azimuth: f64) -> Result<Self> {
        if !(elevation.is_finite() && elevation > 0.0 && elevation < FRAC_PI_2) {
            return Err(ShadowMeshError::configuration(format!(
                "sun elevation must lie strictly inside (0, pi/2) radians, got {elevation}"
            )));
        }
        if !azimuth.is_finite() {
            return Err(ShadowMeshError::configuration(format!(
                "sun azimuth must be finite, got {azimuth}"
            )));
        }
        Ok(Self { elevation, azimuth })
    }

    pub fn from_degrees(elevation_deg: f64, azimuth_deg: f64) -> Result<Self> {
        Self::new(elevation_deg.to_radians(), azimuth_deg.to_radians())
    }

    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn azimuth(&self) -> f64 {
        self.azimuth
    }

    /// Ground-plane unit vector pointing towards the sun.
    pub fn sun_bearing(&self) -> Vector2<f64> {
        Vector2::new(self.azimuth.sin(), self.azimuth.cos())
    }

    /// Ground-plane unit vector along which shadows are cast.
    pub fn shadow_direction(&self) -> Vector2<f64> {
        -self.sun_bearing()
    }
}

/// Minimum-area rotated rectangle around one shadow region, in pixel units.
///
/// `angle` is the direction of the `width` side in radians; the `height` side
/// runs along the left-hand perpendicular of that direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientedRectangle {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl OrientedRectangle {
    pub fn new(center: Point2<f64>, width: f64, height: f64, angle: f64) -> Self {
        Self {
            center,
            width: width.max(0.0),
            height: height.max(0.0),
            angle,
        }
    }

    pub fn longer_side(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Unit vectors along the width and height sides.
    pub fn axes(&self) -> (Vector2<f64>, Vector2<f64>) {
        let u = Vector2::new(self.angle.cos(), self.angle.sin());
        let v = Vector2::new(-u.y, u.x);
        (u, v)
    }

    /// Corners in counter-clockwise order, starting at `-u -v`.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let (u, v) = self.axes();
        let hu = u * (self.width * 0.5);
        let hv = v * (self.height * 0.5);
        let c = self.center;
        [c - hu - hv, c + hu - hv, c + hu + hv, c - hu + hv]
    }
}

/// Closed ground-plane ring (meters), stored counter-clockwise.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FootprintPolygon {
    points: Vec<Point2<f64>>,
}

impl FootprintPolygon {
    /// Wrap a ring of at least three points with non-zero area. Clockwise
    /// input is reversed so the stored ring is always counter-clockwise.
    pub fn new(mut points: Vec<Point2<f64>>) -> Result<Self> {
        if points.len() < 3 {
            return Err(ShadowMeshError::degenerate(format!(
                "footprint needs at least 3 points, got {}",
                points.len()
            )));
        }
        if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
            return Err(ShadowMeshError::degenerate("footprint has non-finite points"));
        }
        let area = signed_area(&points);
        let extent = ring_extent(&points);
        if area.abs() <= f64::EPSILON * extent * extent {
            return Err(ShadowMeshError::degenerate("footprint has zero area"));
        }
        if area < 0.0 {
            points.reverse();
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// Vertex average; good enough for sorting and convex rings.
    pub fn centroid(&self) -> Point2<f64> {
        let n = self.points.len() as f64;
        let sum = self
            .points
            .iter()
            .fold(Vector2::<f64>::zeros(), |acc, p| acc + p.coords);
        Point2::from(sum / n)
    }
}

/// Larger side of the axis-aligned bounding box.
fn ring_extent(points: &[Point2<f64>]) -> f64 {
    let (mut min, mut max) = (points[0], points[0]);
    for p in points {
        min = min.inf(p);
        max = max.sup(p);
    }
    (max.x - min.x).max(max.y - min.y)
}

/// Shoelace area, positive for counter-clockwise rings.
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.x * b.y - b.x * a.y;
    }
    twice * 0.5
}

/// Reconstructed building: footprint plus a positive height in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    footprint: FootprintPolygon,
    height: f64,
}

impl Building {
    pub fn new(footprint: FootprintPolygon, height: f64) -> Result<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(ShadowMeshError::degenerate(format!(
                "building height must be positive, got {height}"
            )));
        }
        Ok(Self { footprint, height })
    }

    pub fn footprint(&self) -> &FootprintPolygon {
        &self.footprint
    }

    pub fn height(&self) -> f64 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn sun_elevation_bounds_are_exclusive() {
        assert!(SunDirection::new(0.0, 0.0).is_err());
        assert!(SunDirection::new(FRAC_PI_2, 0.0).is_err());
        assert!(SunDirection::new(-0.1, 0.0).is_err());
        assert!(SunDirection::new(FRAC_PI_4, f64::NAN).is_err());
        assert!(SunDirection::new(FRAC_PI_4, 3.0 * FRAC_PI_4).is_ok());
    }

    #[test]
    fn degrees_match_radians() {
        let a = SunDirection::from_degrees(45.0, 135.0).unwrap();
        let b = SunDirection::new(FRAC_PI_4, 3.0 * FRAC_PI_4).unwrap();
        assert!((a.elevation() - b.elevation()).abs() < 1e-12);
        assert!((a.azimuth() - b.azimuth()).abs() < 1e-12);
    }

    #[test]
    fn rectangle_corners_are_counter_clockwise() {
        let rect = OrientedRectangle::new(Point2::new(5.0, 5.0), 4.0, 2.0, 0.3);
        let corners = rect.corners();
        assert!(signed_area(&corners) > 0.0);
        assert!((signed_area(&corners) - rect.area()).abs() < 1e-9);
    }

    #[test]
    fn clockwise_footprint_is_reversed() {
        let cw = vec![
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
        ];
        let fp = FootprintPolygon::new(cw).unwrap();
        assert!(signed_area(fp.points()) > 0.0);
        assert_eq!(fp.centroid(), Point2::new(0.5, 0.5));
    }

    #[test]
    fn collinear_footprint_is_degenerate() {
        let line = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        let err = FootprintPolygon::new(line).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[test]
    fn tiny_footprint_keeps_its_area() {
        let gsd = 1e-9;
        let square = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0 * gsd, 0.0),
            Point2::new(10.0 * gsd, 10.0 * gsd),
            Point2::new(0.0, 10.0 * gsd),
        ];
        let fp = FootprintPolygon::new(square).unwrap();
        assert!((fp.area() - 1e-16).abs() < 1e-28);
    }

    #[test]
    fn sun_and_shadow_directions_are_opposite() {
        let sun = SunDirection::new(FRAC_PI_4, 3.0 * FRAC_PI_4).unwrap();
        assert!((sun.sun_bearing() + sun.shadow_direction()).norm() < 1e-12);
        assert!(sun.shadow_direction().x < 0.0 && sun.shadow_direction().y > 0.0);
    }

    #[test]
    fn building_requires_positive_height() {
        let fp = FootprintPolygon::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ])
        .unwrap();
        assert!(Building::new(fp.clone(), 0.0).is_err());
        assert!(Building::new(fp, 3.5).is_ok());
    }
}
