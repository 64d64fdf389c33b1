//! Merge per-building prisms into a single mesh-global index space.
//!
//! Offsets are an exclusive prefix sum of the prisms' vertex counts, computed
//! before any face is re-based, so each building's faces only ever reference
//! its own vertex range. Extrusion is independent per building and runs on
//! the rayon pool when the `parallel` feature is enabled; the concatenation
//! is a single ordered pass.
use super::prism::{extrude, Prism};
use super::Mesh;
use crate::types::Building;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Clone, Copy, Debug, Default)]
pub struct MeshAccumulator;

impl MeshAccumulator {
    pub fn new() -> Self {
        Self
    }

    /// Extrude every building and merge the prisms in input order.
    pub fn accumulate(&self, buildings: &[Building]) -> Mesh {
        merge_prisms(extrude_all(buildings))
    }
}

pub fn accumulate(buildings: &[Building]) -> Mesh {
    MeshAccumulator::new().accumulate(buildings)
}

#[cfg(feature = "parallel")]
fn extrude_all(buildings: &[Building]) -> Vec<Prism> {
    buildings.par_iter().map(extrude).collect()
}

#[cfg(not(feature = "parallel"))]
fn extrude_all(buildings: &[Building]) -> Vec<Prism> {
    buildings.iter().map(extrude).collect()
}

/// Concatenate prisms, shifting each prism's local indices by the number of
/// vertices emitted before it.
pub fn merge_prisms(prisms: Vec<Prism>) -> Mesh {
    let offsets: Vec<usize> = prisms
        .iter()
        .scan(0usize, |acc, prism| {
            let offset = *acc;
            *acc += prism.vertex_count();
            Some(offset)
        })
        .collect();
    let total_vertices: usize = prisms.iter().map(Prism::vertex_count).sum();
    let total_faces: usize = prisms.iter().map(|p| p.faces.len()).sum();

    let mut mesh = Mesh {
        vertices: Vec::with_capacity(total_vertices),
        faces: Vec::with_capacity(total_faces),
    };
    for (prism, offset) in prisms.into_iter().zip(offsets) {
        mesh.vertices.extend(prism.vertices);
        mesh.faces.extend(
            prism
                .faces
                .into_iter()
                .map(|face| face.into_iter().map(|i| i + offset).collect()),
        );
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FootprintPolygon;
    use nalgebra::Point2;

    fn block(x: f64, y: f64, sides: usize, height: f64) -> Building {
        let ring = (0..sides)
            .map(|k| {
                let t = std::f64::consts::TAU * k as f64 / sides as f64;
                Point2::new(x + t.cos(), y + t.sin())
            })
            .collect();
        Building::new(FootprintPolygon::new(ring).unwrap(), height).unwrap()
    }

    #[test]
    fn empty_input_gives_empty_mesh() {
        let mesh = accumulate(&[]);
        assert!(mesh.is_empty());
    }

    #[test]
    fn counts_follow_footprint_sizes() {
        let buildings = vec![
            block(0.0, 0.0, 4, 3.0),
            block(10.0, 0.0, 5, 7.0),
            block(0.0, 9.0, 3, 1.0),
        ];
        let mesh = accumulate(&buildings);
        assert_eq!(mesh.vertex_count(), 2 * (4 + 5 + 3));
        assert_eq!(mesh.face_count(), (4 + 2) + (5 + 2) + (3 + 2));
        mesh.validate().unwrap();
    }

    #[test]
    fn faces_stay_inside_their_building_range() {
        let buildings = vec![block(0.0, 0.0, 4, 3.0), block(10.0, 0.0, 6, 7.0)];
        let mesh = accumulate(&buildings);
        let (first, second) = mesh.faces.split_at(4 + 2);
        assert!(first.iter().flatten().all(|&i| (1..=8).contains(&i)));
        assert!(second.iter().flatten().all(|&i| (9..=20).contains(&i)));
        assert_eq!(second.last().unwrap(), &(15..=20).collect::<Vec<_>>());
    }

    #[test]
    fn merge_preserves_building_order() {
        let buildings = vec![block(0.0, 0.0, 4, 3.0), block(50.0, 0.0, 4, 9.0)];
        let mesh = accumulate(&buildings);
        assert!(mesh.vertices[..8].iter().all(|v| v.x < 5.0));
        assert!(mesh.vertices[8..].iter().all(|v| v.x > 45.0));
        assert_eq!(mesh.vertices[15].z, 9.0);
    }
}
