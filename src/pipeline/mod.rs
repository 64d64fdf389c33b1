//! End-to-end shadow → mesh reconstruction.
//!
//! Stages
//! - Segment: threshold dark pixels and open the mask (`segment`).
//! - Contours: label external regions, filter by area, fit rotated
//!   rectangles (`contours`).
//! - Inversion: turn each rectangle into a building (`inversion`). A
//!   degenerate rectangle drops only its own building.
//! - Mesh: extrude every building and merge the prisms (`mesh`).
//!
//! Parameters are validated when the pipeline is built, so a bad sun position
//! fails before any pixel is touched. A run either hands one complete mesh to
//! the sink or returns an error without emitting anything.
//!
//! ```no_run
//! use shadow_mesh::prelude::*;
//!
//! # fn main() -> shadow_mesh::Result<()> {
//! let image = IntensityImage::filled(256, 256, 200, 0.5)?;
//! let pipeline = ShadowMeshPipeline::new(PipelineParams::default())?;
//! let mut sink = ObjFileSink::new("buildings.obj");
//! let report = pipeline.run(&image, &mut sink)?;
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

mod params;

pub use params::PipelineParams;

use crate::contours::{ShadowCandidate, ShadowContourExtractor};
use crate::diagnostics::{
    BuildingSummary, DroppedCandidate, InputDescriptor, MeshSummary, PipelineReport,
    TimingBreakdown,
};
use crate::error::Result;
use crate::image::{BinaryMask, IntensityImage};
use crate::inversion::GeometryInverter;
use crate::mesh::{Mesh, MeshAccumulator, MeshSink};
use crate::segment::ShadowSegmenter;
use crate::types::{Building, SunDirection};
use log::{debug, info, warn};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Everything a run produced, before the mesh is handed to a sink.
#[derive(Clone, Debug)]
pub struct Reconstruction {
    pub mask: BinaryMask,
    pub buildings: Vec<Building>,
    pub mesh: Mesh,
    pub report: PipelineReport,
}

pub struct ShadowMeshPipeline {
    params: PipelineParams,
    sun: SunDirection,
}

impl ShadowMeshPipeline {
    /// Validate `params` and build the pipeline.
    ///
    /// Fails with [`ShadowMeshError::Configuration`](crate::ShadowMeshError)
    /// when the sun elevation is outside `(0, π/2)` or another parameter is
    /// out of range.
    pub fn new(params: PipelineParams) -> Result<Self> {
        params.validate()?;
        let sun = params.sun()?;
        Ok(Self { params, sun })
    }

    pub fn params(&self) -> &PipelineParams {
        &self.params
    }

    pub fn sun(&self) -> SunDirection {
        self.sun
    }

    /// Run every stage and keep the intermediate results.
    pub fn reconstruct(&self, image: &IntensityImage) -> Reconstruction {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let segmenter = ShadowSegmenter::new(self.params.darkness_threshold);
        let mask = timings.measure("segment", || segmenter.segment(image));

        let extractor = ShadowContourExtractor::new(self.params.min_area_pixels);
        let extraction = timings.measure("contours", || extractor.extract(&mask));

        let inverter = GeometryInverter::new(self.sun, image.ground_sampling_distance())
            .with_min_shadow_length_px(self.params.min_shadow_length_px);
        let outcomes = timings.measure("inversion", || {
            invert_candidates(&inverter, &extraction.candidates)
        });

        let mut buildings = Vec::with_capacity(outcomes.len());
        let mut summaries = Vec::with_capacity(outcomes.len());
        let mut dropped = Vec::new();
        for (candidate, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(building) => {
                    debug!(
                        "ShadowMeshPipeline: candidate {} -> height {:.3} m, {} footprint points",
                        candidate,
                        building.height(),
                        building.footprint().len()
                    );
                    summaries.push(BuildingSummary::new(candidate, &building));
                    buildings.push(building);
                }
                Err(err) => {
                    warn!("ShadowMeshPipeline: candidate {candidate} dropped: {err}");
                    dropped.push(DroppedCandidate {
                        candidate,
                        reason: err.to_string(),
                    });
                }
            }
        }

        let mesh = timings.measure("mesh", || MeshAccumulator::new().accumulate(&buildings));
        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

        let report = PipelineReport {
            input: InputDescriptor {
                width: image.width(),
                height: image.height(),
                ground_sampling_distance: image.ground_sampling_distance(),
            },
            params: self.params.clone(),
            shadow_pixels: mask.count(),
            regions_found: extraction.regions_found,
            candidates: extraction.candidates,
            buildings: summaries,
            dropped,
            mesh: MeshSummary::from(&mesh),
            timings,
        };
        info!("ShadowMeshPipeline: {}", report.summary());

        Reconstruction {
            mask,
            buildings,
            mesh,
            report,
        }
    }

    /// Reconstruct and emit the merged mesh to `sink` in one piece.
    pub fn run<S: MeshSink + ?Sized>(
        &self,
        image: &IntensityImage,
        sink: &mut S,
    ) -> Result<PipelineReport> {
        let Reconstruction { mesh, report, .. } = self.reconstruct(image);
        sink.emit(mesh)?;
        Ok(report)
    }
}

#[cfg(feature = "parallel")]
fn invert_candidates(
    inverter: &GeometryInverter,
    candidates: &[ShadowCandidate],
) -> Vec<Result<Building>> {
    candidates
        .par_iter()
        .map(|c| inverter.invert(&c.rect))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn invert_candidates(
    inverter: &GeometryInverter,
    candidates: &[ShadowCandidate],
) -> Vec<Result<Building>> {
    candidates.iter().map(|c| inverter.invert(&c.rect)).collect()
}
