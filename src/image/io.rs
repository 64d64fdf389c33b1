//! I/O helpers for raster input and diagnostic output.
//!
//! - `load_grayscale_image`: decode any supported format into an
//!   [`IntensityImage`] (always 8-bit luma, whatever the source layout).
//! - `save_mask_png`: write a [`BinaryMask`] as a black/white PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{BinaryMask, ImageView, IntensityImage};
use crate::error::{Result, ShadowMeshError};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk, convert it to 8-bit grayscale and tag it with the
/// ground sampling distance (meters per pixel).
pub fn load_grayscale_image(path: &Path, ground_sampling_distance: f64) -> Result<IntensityImage> {
    let img = image::open(path)
        .map_err(|e| ShadowMeshError::input(format!("failed to open {}: {e}", path.display())))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    IntensityImage::new(width, height, img.into_raw(), ground_sampling_distance)
}

/// Save a mask as a PNG where shadow pixels are white.
pub fn save_mask_png(mask: &BinaryMask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(mask.w as u32, mask.h as u32);
    for (y, row) in mask.rows().enumerate() {
        for (x, &on) in row.iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Luma([if on { 255 } else { 0 }]));
        }
    }
    out.save(path).map_err(|e| {
        let source = match e {
            image::ImageError::IoError(io) => io,
            other => std::io::Error::other(other.to_string()),
        };
        ShadowMeshError::output(path, source)
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ShadowMeshError::output(path, e.into()))?;
    fs::write(path, json).map_err(|e| ShadowMeshError::output(path, e))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ShadowMeshError::output(parent, e))?;
        }
    }
    Ok(())
}
