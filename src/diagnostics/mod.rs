//! Serializable run diagnostics.
//!
//! [`PipelineReport`] is returned by every pipeline run and can be written as
//! JSON next to the mesh. It records what each stage kept and dropped and how
//! long each stage took.

pub mod report;
pub mod timing;

pub use report::{BuildingSummary, DroppedCandidate, InputDescriptor, MeshSummary, PipelineReport};
pub use timing::{StageTiming, TimingBreakdown};
