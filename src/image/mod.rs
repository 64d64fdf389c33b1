//! Raster containers consumed and produced by the shadow stages.
//!
//! - [`IntensityImage`]: owned single-channel image tagged with its ground
//!   sampling distance.
//! - [`BinaryMask`]: owned boolean grid, `true` marking shadow pixels.
pub mod intensity;
pub mod io;
pub mod mask;
pub mod traits;

pub use self::intensity::IntensityImage;
pub use self::mask::BinaryMask;
pub use self::traits::{ImageView, ImageViewMut, Rows};
