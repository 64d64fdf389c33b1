//! Shadow region extraction and oriented rectangle fitting.
//!
//! - Hole filling followed by 8-connected labelling yields one region per
//!   external outline; a blob sitting inside another blob's hole is absorbed
//!   by the enclosing region.
//! - Regions whose pixel area (after hole filling) is below `min_area_pixels`
//!   are discarded.
//! - Survivors get a minimum-area rotated rectangle fitted to the convex hull
//!   of their pixel squares, so an isolated `n × n` block yields an `n × n`
//!   rectangle.
//!
//! Output follows raster-scan order of each region's first pixel.

mod hull;
mod labeling;
mod min_rect;

pub use hull::convex_hull;
pub use labeling::{external_regions, fill_holes, ShadowRegion};
pub use min_rect::min_area_rect;

use crate::image::BinaryMask;
use crate::types::OrientedRectangle;
use log::debug;
use nalgebra::Point2;
use serde::Serialize;

pub const DEFAULT_MIN_AREA_PIXELS: usize = 100;

/// A region that passed the area filter together with its fitted rectangle.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowCandidate {
    pub seed: (usize, usize),
    pub area_px: usize,
    pub rect: OrientedRectangle,
}

/// Counts gathered while extracting candidates.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub regions_found: usize,
    pub candidates: Vec<ShadowCandidate>,
}

impl ExtractionResult {
    pub fn rectangles(&self) -> Vec<OrientedRectangle> {
        self.candidates.iter().map(|c| c.rect).collect()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ShadowContourExtractor {
    min_area_pixels: usize,
}

impl Default for ShadowContourExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_AREA_PIXELS)
    }
}

impl ShadowContourExtractor {
    pub fn new(min_area_pixels: usize) -> Self {
        Self { min_area_pixels }
    }

    pub fn extract(&self, mask: &BinaryMask) -> ExtractionResult {
        let regions = external_regions(mask);
        let regions_found = regions.len();
        let candidates: Vec<ShadowCandidate> = regions
            .into_iter()
            .filter(|region| {
                let keep = region.area_px >= self.min_area_pixels;
                if !keep {
                    debug!(
                        "ShadowContourExtractor: region at {:?} dropped (area {} < {})",
                        region.seed, region.area_px, self.min_area_pixels
                    );
                }
                keep
            })
            .filter_map(|region| fit_rectangle(&region))
            .collect();
        debug!(
            "ShadowContourExtractor: {} regions, {} kept (min_area={})",
            regions_found,
            candidates.len(),
            self.min_area_pixels
        );
        ExtractionResult {
            regions_found,
            candidates,
        }
    }
}

fn fit_rectangle(region: &ShadowRegion) -> Option<ShadowCandidate> {
    let corners: Vec<Point2<f64>> = region
        .extreme_corners()
        .into_iter()
        .map(|[x, y]| Point2::new(x, y))
        .collect();
    let rect = min_area_rect(&corners)?;
    Some(ShadowCandidate {
        seed: region.seed,
        area_px: region.area_px,
        rect,
    })
}

/// Rectangles for every external region at least `min_area_pixels` large.
pub fn extract(mask: &BinaryMask, min_area_pixels: usize) -> Vec<OrientedRectangle> {
    ShadowContourExtractor::new(min_area_pixels)
        .extract(mask)
        .rectangles()
}
