use super::{Face, Mesh};
use crate::types::Building;
use nalgebra::Point3;

/// Closed prism for a single building with prism-local 1-based faces.
#[derive(Clone, Debug, PartialEq)]
pub struct Prism {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Prism {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh {
            vertices: self.vertices,
            faces: self.faces,
        }
    }
}

/// Lift the footprint ring to the building height.
///
/// Vertices `1..=n` form the base ring at `z = 0` and `n+1..=2n` the top ring,
/// top `i` sitting above base `i`. The ring is counter-clockwise seen from
/// `+z`, so side quad `(b[i], b[i+1], t[i+1], t[i])` faces outward, the base
/// cap walks the ring backwards (normal `-z`) and the top cap walks it
/// forwards (normal `+z`). Emits `2n` vertices and `n + 2` faces.
///
/// Listing the base cap forwards and the top cap backwards would point both
/// caps into the solid for a counter-clockwise ring.
pub fn extrude(building: &Building) -> Prism {
    let ring = building.footprint().points();
    let height = building.height();
    let n = ring.len();

    let mut vertices = Vec::with_capacity(2 * n);
    vertices.extend(ring.iter().map(|p| Point3::new(p.x, p.y, 0.0)));
    vertices.extend(ring.iter().map(|p| Point3::new(p.x, p.y, height)));

    let base = |i: usize| i % n + 1;
    let top = |i: usize| i % n + n + 1;

    let mut faces: Vec<Face> = Vec::with_capacity(n + 2);
    for i in 0..n {
        faces.push(vec![base(i), base(i + 1), top(i + 1), top(i)]);
    }
    faces.push((1..=n).rev().collect());
    faces.push((n + 1..=2 * n).collect());

    Prism { vertices, faces }
}
