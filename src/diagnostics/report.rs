use super::TimingBreakdown;
use crate::contours::ShadowCandidate;
use crate::mesh::Mesh;
use crate::pipeline::PipelineParams;
use crate::types::{Building, FootprintPolygon};
use nalgebra::Point2;
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub ground_sampling_distance: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSummary {
    /// Index into [`PipelineReport::candidates`].
    pub candidate: usize,
    pub height_m: f64,
    pub centroid: Point2<f64>,
    pub footprint: FootprintPolygon,
}

impl BuildingSummary {
    pub fn new(candidate: usize, building: &Building) -> Self {
        Self {
            candidate,
            height_m: building.height(),
            centroid: building.footprint().centroid(),
            footprint: building.footprint().clone(),
        }
    }
}

/// A candidate the inverter rejected, with the reason.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedCandidate {
    pub candidate: usize,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeshSummary {
    pub vertices: usize,
    pub faces: usize,
}

impl From<&Mesh> for MeshSummary {
    fn from(mesh: &Mesh) -> Self {
        Self {
            vertices: mesh.vertex_count(),
            faces: mesh.face_count(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub input: InputDescriptor,
    pub params: PipelineParams,
    pub shadow_pixels: usize,
    pub regions_found: usize,
    pub candidates: Vec<ShadowCandidate>,
    pub buildings: Vec<BuildingSummary>,
    pub dropped: Vec<DroppedCandidate>,
    pub mesh: MeshSummary,
    pub timings: TimingBreakdown,
}

impl PipelineReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} shadow px, {} regions ({} kept), {} buildings, {} dropped, mesh {}v/{}f in {:.2} ms",
            self.shadow_pixels,
            self.regions_found,
            self.candidates.len(),
            self.buildings.len(),
            self.dropped.len(),
            self.mesh.vertices,
            self.mesh.faces,
            self.timings.total_ms
        )
    }
}
