//! Dump the opened shadow mask and the fitted rectangles without building a
//! mesh. Uses the same config file as `shadow-mesh`; `output.mask_image`
//! defaults to `<mesh>.mask.png` and the rectangles go to `<mesh>.regions.json`.
use shadow_mesh::config::load_config;
use shadow_mesh::contours::{ShadowCandidate, ShadowContourExtractor};
use shadow_mesh::image::io::{load_grayscale_image, save_mask_png, write_json_file};
use shadow_mesh::segment::ShadowSegmenter;
use shadow_mesh::ShadowMeshError;
use serde::Serialize;
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
    let image = load_grayscale_image(&config.input, config.ground_sampling_distance)?;

    let mask = ShadowSegmenter::new(config.params.darkness_threshold).segment(&image);
    let extraction = ShadowContourExtractor::new(config.params.min_area_pixels).extract(&mask);

    let mask_path = config
        .output
        .mask_image
        .clone()
        .unwrap_or_else(|| config.output.mesh.with_extension("mask.png"));
    let regions_path = config.output.mesh.with_extension("regions.json");

    let summary = RegionsReport {
        width: image.width(),
        height: image.height(),
        darkness_threshold: config.params.darkness_threshold,
        min_area_pixels: config.params.min_area_pixels,
        shadow_pixels: mask.count(),
        regions_found: extraction.regions_found,
        candidates: extraction.candidates,
    };

    save_mask_png(&mask, &mask_path)?;
    write_json_file(&regions_path, &summary)?;

    println!("Saved shadow mask to {}", mask_path.display());
    println!(
        "Saved {} of {} shadow regions to {}",
        summary.candidates.len(),
        summary.regions_found,
        regions_path.display()
    );
    Ok(())
}

fn usage() -> ShadowMeshError {
    ShadowMeshError::configuration("Usage: shadow_regions <config.json>")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionsReport {
    width: usize,
    height: usize,
    darkness_threshold: u8,
    min_area_pixels: usize,
    shadow_pixels: usize,
    regions_found: usize,
    candidates: Vec<ShadowCandidate>,
}
