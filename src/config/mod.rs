//! JSON run configuration shared by the command-line tools.
//!
//! ```json
//! {
//!   "input": "city_cropped.png",
//!   "ground_sampling_distance": 0.5,
//!   "params": { "sun_elevation": 0.785398, "sun_azimuth": 2.356194 },
//!   "output": { "mesh": "buildings.obj", "report_json": "report.json" }
//! }
//! ```
use crate::error::{Result, ShadowMeshError};
use crate::pipeline::PipelineParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn default_ground_sampling_distance() -> f64 {
    0.5
}

#[derive(Clone, Debug, Deserialize)]
pub struct OutputConfig {
    /// Destination of the OBJ mesh.
    pub mesh: PathBuf,
    /// Optional pretty-printed pipeline report.
    #[serde(default)]
    pub report_json: Option<PathBuf>,
    /// Optional PNG of the opened shadow mask.
    #[serde(default)]
    pub mask_image: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    /// Meters per pixel of the input raster.
    #[serde(default = "default_ground_sampling_distance")]
    pub ground_sampling_distance: f64,
    #[serde(default)]
    pub params: PipelineParams,
    pub output: OutputConfig,
}

impl RuntimeConfig {
    /// Resolve relative paths against `base` (usually the config's folder).
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.input = join(self.input);
        self.output.mesh = join(self.output.mesh);
        self.output.report_json = self.output.report_json.map(join);
        self.output.mask_image = self.output.mask_image.map(join);
        self
    }
}

pub fn parse_config(text: &str) -> Result<RuntimeConfig> {
    let config: RuntimeConfig = serde_json::from_str(text)
        .map_err(|e| ShadowMeshError::configuration(format!("failed to parse config: {e}")))?;
    config.params.validate()?;
    Ok(config)
}

/// Read, parse and validate a config file. Relative paths inside it are
/// resolved against the file's directory.
pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        ShadowMeshError::configuration(format!("failed to read config {}: {e}", path.display()))
    })?;
    let config = parse_config(&contents).map_err(|e| match e {
        ShadowMeshError::Configuration { message } => {
            ShadowMeshError::configuration(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(config.resolve_paths(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let text = r#"{ "input": "a.png", "output": { "mesh": "a.obj" } }"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.ground_sampling_distance, 0.5);
        assert_eq!(config.params, PipelineParams::default());
        assert!(config.output.report_json.is_none());
    }

    #[test]
    fn zero_elevation_is_rejected_on_load() {
        let text = r#"{
            "input": "a.png",
            "params": { "sun_elevation": 0.0 },
            "output": { "mesh": "a.obj" }
        }"#;
        let err = parse_config(text).unwrap_err();
        assert!(matches!(err, ShadowMeshError::Configuration { .. }), "{err}");
    }

    #[test]
    fn relative_paths_follow_config_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        fs::write(
            &path,
            r#"{ "input": "in.png", "output": { "mesh": "/abs/out.obj", "mask_image": "m.png" } }"#,
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.input, dir.path().join("in.png"));
        assert_eq!(config.output.mesh, PathBuf::from("/abs/out.obj"));
        assert_eq!(config.output.mask_image, Some(dir.path().join("m.png")));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = load_config(Path::new("nope/run.json")).unwrap_err();
        assert!(matches!(err, ShadowMeshError::Configuration { .. }));
    }
}
