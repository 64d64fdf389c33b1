//! Binary erosion and dilation with a square structuring element.
//!
//! A `(2r+1) × (2r+1)` square is separable, so each operation runs as a
//! horizontal pass followed by a vertical pass. Neighbours outside the image
//! are skipped rather than padded.
use crate::image::{BinaryMask, ImageView, ImageViewMut};

#[derive(Clone, Copy)]
enum Reduce {
    /// Logical AND over the window.
    Min,
    /// Logical OR over the window.
    Max,
}

impl Reduce {
    #[inline]
    fn apply(self, window: &[bool]) -> bool {
        match self {
            Reduce::Min => window.iter().all(|&v| v),
            Reduce::Max => window.iter().any(|&v| v),
        }
    }
}

pub fn erode(mask: &BinaryMask, radius: usize) -> BinaryMask {
    separable(mask, radius, Reduce::Min)
}

pub fn dilate(mask: &BinaryMask, radius: usize) -> BinaryMask {
    separable(mask, radius, Reduce::Max)
}

/// Erosion followed by dilation.
pub fn open(mask: &BinaryMask, radius: usize) -> BinaryMask {
    if radius == 0 {
        return mask.clone();
    }
    dilate(&erode(mask, radius), radius)
}

fn separable(mask: &BinaryMask, radius: usize, op: Reduce) -> BinaryMask {
    let (w, h) = (mask.width(), mask.height());
    if radius == 0 || w == 0 || h == 0 {
        return mask.clone();
    }

    let mut horizontal = BinaryMask::new(w, h);
    for y in 0..h {
        let src = mask.row(y);
        let dst = horizontal.row_mut(y);
        for (x, out) in dst.iter_mut().enumerate() {
            let lo = x.saturating_sub(radius);
            let hi = (x + radius).min(w - 1);
            *out = op.apply(&src[lo..=hi]);
        }
    }

    let mut out = BinaryMask::new(w, h);
    let mut column = vec![false; h];
    for x in 0..w {
        for (y, v) in column.iter_mut().enumerate() {
            *v = horizontal.get(x, y);
        }
        for y in 0..h {
            let lo = y.saturating_sub(radius);
            let hi = (y + radius).min(h - 1);
            out.set(x, y, op.apply(&column[lo..=hi]));
        }
    }
    out
}
