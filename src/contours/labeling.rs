//! Connected-component labelling of external shadow regions.
//!
//! Foreground uses 8-connectivity and background 4-connectivity, the usual
//! pairing that keeps region outlines and holes consistent. Holes are filled
//! before labelling so each region is described by its outer boundary only.
use crate::image::{BinaryMask, ImageView};

const NEIGH8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const NEIGH4: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// One external region: pixel count plus the horizontal extent of each row.
///
/// Rows are contiguous because the region is connected; `spans[i]` covers row
/// `min_y + i` as the inclusive column range `[x_min, x_max]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShadowRegion {
    pub seed: (usize, usize),
    pub area_px: usize,
    pub min_y: usize,
    pub spans: Vec<[usize; 2]>,
}

impl ShadowRegion {
    /// Corners of the outermost pixel squares in each row. Their convex hull
    /// equals the hull of every pixel square in the region.
    pub fn extreme_corners(&self) -> Vec<[f64; 2]> {
        let mut pts = Vec::with_capacity(self.spans.len() * 4);
        for (i, &[x0, x1]) in self.spans.iter().enumerate() {
            let y = (self.min_y + i) as f64;
            let (l, r) = (x0 as f64, (x1 + 1) as f64);
            pts.push([l, y]);
            pts.push([l, y + 1.0]);
            pts.push([r, y]);
            pts.push([r, y + 1.0]);
        }
        pts
    }
}

/// Pixel indices of the region being grown, with its row range.
struct RegionAccumulator {
    indices: Vec<usize>,
    min_y: usize,
    max_y: usize,
}

impl RegionAccumulator {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
            min_y: usize::MAX,
            max_y: 0,
        }
    }

    fn reset(&mut self) {
        self.indices.clear();
        self.min_y = usize::MAX;
        self.max_y = 0;
    }

    fn push(&mut self, idx: usize, y: usize) {
        self.indices.push(idx);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    fn to_region(&self, seed: (usize, usize), width: usize) -> ShadowRegion {
        let rows = self.max_y - self.min_y + 1;
        let mut spans = vec![[usize::MAX, 0usize]; rows];
        for &idx in &self.indices {
            let (x, y) = (idx % width, idx / width);
            let span = &mut spans[y - self.min_y];
            span[0] = span[0].min(x);
            span[1] = span[1].max(x);
        }
        ShadowRegion {
            seed,
            area_px: self.indices.len(),
            min_y: self.min_y,
            spans,
        }
    }
}

#[inline]
fn neighbour(
    x: usize,
    y: usize,
    dx: isize,
    dy: isize,
    w: usize,
    h: usize,
) -> Option<(usize, usize)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < w && ny < h).then_some((nx, ny))
}

/// Turn every background pixel that cannot reach the image border through
/// 4-connected background into foreground.
pub fn fill_holes(mask: &BinaryMask) -> BinaryMask {
    if mask.is_empty() {
        return mask.clone();
    }
    let (w, h) = (mask.width(), mask.height());
    let mut outside = vec![false; w * h];
    let mut stack = Vec::new();

    let seed = |x: usize, y: usize, outside: &mut [bool], stack: &mut Vec<usize>| {
        let idx = y * w + x;
        if !mask.data[idx] && !outside[idx] {
            outside[idx] = true;
            stack.push(idx);
        }
    };
    for x in 0..w {
        seed(x, 0, &mut outside, &mut stack);
        if h > 1 {
            seed(x, h - 1, &mut outside, &mut stack);
        }
    }
    for y in 0..h {
        seed(0, y, &mut outside, &mut stack);
        if w > 1 {
            seed(w - 1, y, &mut outside, &mut stack);
        }
    }

    while let Some(idx) = stack.pop() {
        let (x, y) = (idx % w, idx / w);
        for &(dx, dy) in &NEIGH4 {
            if let Some((nx, ny)) = neighbour(x, y, dx, dy, w, h) {
                let nidx = ny * w + nx;
                if !mask.data[nidx] && !outside[nidx] {
                    outside[nidx] = true;
                    stack.push(nidx);
                }
            }
        }
    }

    BinaryMask {
        w,
        h,
        data: outside.into_iter().map(|o| !o).collect(),
    }
}

/// Label the 8-connected regions of `mask` after hole filling, in raster
/// order of their first pixel.
pub fn external_regions(mask: &BinaryMask) -> Vec<ShadowRegion> {
    let filled = fill_holes(mask);
    let (w, h) = (filled.width(), filled.height());
    let mut used = vec![false; w * h];
    let mut stack = Vec::with_capacity(64);
    let mut region = RegionAccumulator::with_capacity(256);
    let mut regions = Vec::new();

    for start in 0..(w * h) {
        if !filled.data[start] || used[start] {
            continue;
        }
        region.reset();
        used[start] = true;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let (x, y) = (idx % w, idx / w);
            region.push(idx, y);
            for &(dx, dy) in &NEIGH8 {
                if let Some((nx, ny)) = neighbour(x, y, dx, dy, w, h) {
                    let nidx = ny * w + nx;
                    if filled.data[nidx] && !used[nidx] {
                        used[nidx] = true;
                        stack.push(nidx);
                    }
                }
            }
        }
        regions.push(region.to_region((start % w, start / w), w));
    }
    regions
}
