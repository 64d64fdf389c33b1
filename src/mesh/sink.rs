//! Destinations for the finished mesh.
//!
//! A sink receives the merged mesh by value, once per run. The file sink
//! writes to a sibling temporary path and renames it into place, so a failed
//! write never leaves a truncated mesh behind.
use super::obj::write_obj;
use super::Mesh;
use crate::error::{Result, ShadowMeshError};
use crate::image::io::ensure_parent_dir;
use log::info;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub trait MeshSink {
    fn emit(&mut self, mesh: Mesh) -> Result<()>;
}

/// Keeps the emitted mesh in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub mesh: Option<Mesh>,
}

impl MeshSink for MemorySink {
    fn emit(&mut self, mesh: Mesh) -> Result<()> {
        self.mesh = Some(mesh);
        Ok(())
    }
}

/// Writes OBJ text to `path`.
#[derive(Clone, Debug)]
pub struct ObjFileSink {
    path: PathBuf,
}

impl ObjFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

impl MeshSink for ObjFileSink {
    fn emit(&mut self, mesh: Mesh) -> Result<()> {
        ensure_parent_dir(&self.path)?;
        let staging = self.staging_path();
        let written = File::create(&staging).and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_obj(&mesh, &mut writer)?;
            writer.into_inner().map_err(|e| e.into_error())?.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            let _ = fs::remove_file(&staging);
            return Err(ShadowMeshError::output(&self.path, e));
        }
        info!(
            "Saved mesh with {} vertices and {} faces to {}",
            mesh.vertex_count(),
            mesh.face_count(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::obj::read_obj;
    use nalgebra::Point3;
    use std::io::BufReader;

    fn triangle() -> Mesh {
        Mesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            faces: vec![vec![1, 2, 3]],
        }
    }

    #[test]
    fn file_sink_writes_and_cleans_staging() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/buildings.obj");
        let mut sink = ObjFileSink::new(&path);
        sink.emit(triangle()).unwrap();

        assert!(!sink.staging_path().exists());
        let parsed = read_obj(BufReader::new(File::open(&path).unwrap())).unwrap();
        assert_eq!(parsed, triangle());
    }

    #[test]
    fn unwritable_destination_is_an_output_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory occupies the target path, so the final rename fails.
        let path = dir.path().join("taken.obj");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), b"x").unwrap();
        let mut sink = ObjFileSink::new(&path);
        let err = sink.emit(triangle()).unwrap_err();
        assert!(matches!(err, ShadowMeshError::Output { .. }), "{err}");
        assert!(!sink.staging_path().exists());
    }

    #[test]
    fn memory_sink_takes_ownership() {
        let mut sink = MemorySink::default();
        sink.emit(triangle()).unwrap();
        assert_eq!(sink.mesh.unwrap().face_count(), 1);
    }
}
