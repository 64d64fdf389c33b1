use shadow_mesh::config::load_config;
use shadow_mesh::image::io::{load_grayscale_image, save_mask_png, write_json_file};
use shadow_mesh::mesh::{MeshSink, ObjFileSink};
use shadow_mesh::{Reconstruction, ShadowMeshError, ShadowMeshPipeline};
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), ShadowMeshError> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let pipeline = ShadowMeshPipeline::new(config.params.clone())?;

    let image = load_grayscale_image(&config.input, config.ground_sampling_distance)?;
    let Reconstruction {
        mask, mesh, report, ..
    } = pipeline.reconstruct(&image);

    ObjFileSink::new(&config.output.mesh).emit(mesh)?;
    if let Some(path) = &config.output.mask_image {
        save_mask_png(&mask, path)?;
        println!("Saved shadow mask to {}", path.display());
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }

    println!(
        "Saved {} buildings ({} vertices, {} faces) to {}",
        report.buildings.len(),
        report.mesh.vertices,
        report.mesh.faces,
        config.output.mesh.display()
    );
    Ok(())
}

fn usage() -> ShadowMeshError {
    ShadowMeshError::configuration("Usage: shadow-mesh <config.json>")
}
