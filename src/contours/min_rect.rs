//! Minimum-area enclosing rectangle by rotating calipers.
//!
//! The optimal rectangle has one side collinear with an edge of the convex
//! hull, so it is enough to try each hull edge direction and keep the
//! smallest bounding box in that frame. Ties keep the first edge, which makes
//! the result deterministic for a given hull order.
use super::hull::convex_hull;
use crate::types::OrientedRectangle;
use nalgebra::{Point2, Vector2};

pub fn min_area_rect(points: &[Point2<f64>]) -> Option<OrientedRectangle> {
    let hull = convex_hull(points);
    match hull.len() {
        0 => None,
        1 => Some(OrientedRectangle::new(hull[0], 0.0, 0.0, 0.0)),
        2 => {
            let d = hull[1] - hull[0];
            let center = Point2::from((hull[0].coords + hull[1].coords) * 0.5);
            Some(OrientedRectangle::new(center, d.norm(), 0.0, d.y.atan2(d.x)))
        }
        _ => Some(calipers(&hull)),
    }
}

fn calipers(hull: &[Point2<f64>]) -> OrientedRectangle {
    let n = hull.len();
    let mut best: Option<(f64, OrientedRectangle)> = None;
    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        let len = edge.norm();
        if len <= f64::EPSILON {
            continue;
        }
        let u = edge / len;
        let v = Vector2::new(-u.y, u.x);

        let (mut u_min, mut u_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v_min, mut v_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in hull {
            let pu = p.coords.dot(&u);
            let pv = p.coords.dot(&v);
            u_min = u_min.min(pu);
            u_max = u_max.max(pu);
            v_min = v_min.min(pv);
            v_max = v_max.max(pv);
        }
        let width = u_max - u_min;
        let height = v_max - v_min;
        let area = width * height;
        if best.as_ref().is_some_and(|(a, _)| area >= *a - 1e-9) {
            continue;
        }
        let center = Point2::from(u * ((u_min + u_max) * 0.5) + v * ((v_min + v_max) * 0.5));
        let rect = OrientedRectangle::new(center, width, height, u.y.atan2(u.x));
        best = Some((area, rect));
    }
    best.map(|(_, rect)| rect)
        .unwrap_or_else(|| OrientedRectangle::new(hull[0], 0.0, 0.0, 0.0))
}
