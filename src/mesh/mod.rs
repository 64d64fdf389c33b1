//! Indexed polygon meshes: prism extrusion, merging, and text output.
//!
//! Faces hold 1-based indices into the mesh's vertex list, exactly as they
//! appear in the emitted `f` records.

mod accumulate;
pub mod obj;
mod prism;
pub mod sink;

pub use accumulate::{accumulate, merge_prisms, MeshAccumulator};
pub use prism::{extrude, Prism};
pub use sink::{MemorySink, MeshSink, ObjFileSink};

use crate::error::{Result, ShadowMeshError};
use nalgebra::{Point3, Vector3};
use serde::Serialize;

/// Ordered list of 1-based vertex indices.
pub type Face = Vec<usize>;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Mesh {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Check that every face has at least three indices, all within
    /// `1..=vertex_count`.
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        for (fi, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(ShadowMeshError::degenerate(format!(
                    "face {fi} has {} indices",
                    face.len()
                )));
            }
            if let Some(&bad) = face.iter().find(|&&i| i == 0 || i > n) {
                return Err(ShadowMeshError::degenerate(format!(
                    "face {fi} references vertex {bad} outside 1..={n}"
                )));
            }
        }
        Ok(())
    }

    /// Newell normal of face `fi` (unnormalised, area-weighted).
    pub fn face_normal(&self, fi: usize) -> Vector3<f64> {
        let face = &self.faces[fi];
        let mut normal = Vector3::<f64>::zeros();
        for (k, &i) in face.iter().enumerate() {
            let a = self.vertices[i - 1];
            let b = self.vertices[face[(k + 1) % face.len()] - 1];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }
        normal
    }

    pub fn face_centroid(&self, fi: usize) -> Point3<f64> {
        let face = &self.faces[fi];
        let sum = face
            .iter()
            .fold(Vector3::<f64>::zeros(), |acc, &i| acc + self.vertices[i - 1].coords);
        Point3::from(sum / face.len() as f64)
    }
}
