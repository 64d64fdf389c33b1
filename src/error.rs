//! Error type shared by every stage of the reconstruction pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShadowMeshError>;

/// Failures raised while loading input, configuring, reconstructing or
/// emitting a mesh.
#[derive(Debug, Error)]
pub enum ShadowMeshError {
    /// Missing or unreadable input image, malformed buffers or mesh text.
    #[error("input error: {message}")]
    Input {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// Invalid parameters, detected before any contour is processed.
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the offending parameter.
        message: String,
    },

    /// A single shadow or footprint could not be turned into a building.
    #[error("degenerate geometry: {message}")]
    DegenerateGeometry {
        /// Description of the degenerate shape.
        message: String,
    },

    /// The sink could not persist the mesh.
    #[error("output error writing {}: {source}", path.display())]
    Output {
        /// Destination that failed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl ShadowMeshError {
    #[must_use]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }

    /// True for per-building failures that the pipeline drops and skips.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}
