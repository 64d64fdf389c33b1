#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod types;

// Stage modules – public so tools and tests can run a single stage.
pub mod contours;
pub mod inversion;
pub mod mesh;
pub mod segment;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{Result, ShadowMeshError};
pub use crate::pipeline::{PipelineParams, Reconstruction, ShadowMeshPipeline};
pub use crate::types::{Building, FootprintPolygon, OrientedRectangle, SunDirection};

pub use crate::contours::{extract, ShadowContourExtractor};
pub use crate::inversion::{invert, GeometryInverter};
pub use crate::mesh::{accumulate, extrude, Mesh, MeshAccumulator, MeshSink};
pub use crate::segment::{segment, ShadowSegmenter};

pub use crate::diagnostics::PipelineReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use shadow_mesh::prelude::*;
///
/// # fn main() -> shadow_mesh::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let image = IntensityImage::new(w, h, vec![200u8; w * h], 0.5)?;
///
/// let pipeline = ShadowMeshPipeline::new(PipelineParams {
///     sun_elevation: 0.6,
///     ..Default::default()
/// })?;
///
/// let mut sink = MemorySink::default();
/// let report = pipeline.run(&image, &mut sink)?;
/// println!("buildings={} faces={}", report.buildings.len(), report.mesh.faces);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{BinaryMask, IntensityImage};
    pub use crate::mesh::{MemorySink, Mesh, MeshSink, ObjFileSink};
    pub use crate::{Building, PipelineParams, ShadowMeshPipeline, SunDirection};
}
