use shadow_mesh::image::IntensityImage;

pub const BRIGHT: u8 = 220;
pub const DARK: u8 = 12;

/// Uniform bright ground with dark axis-aligned blocks `(x0, y0, x1, y1)`,
/// end-exclusive.
pub fn shadow_scene(
    width: usize,
    height: usize,
    blocks: &[(usize, usize, usize, usize)],
    gsd: f64,
) -> IntensityImage {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let mut img = vec![BRIGHT; width * height];
    for &(x0, y0, x1, y1) in blocks {
        assert!(x1 <= width && y1 <= height, "block outside the image");
        for y in y0..y1 {
            for x in x0..x1 {
                img[y * width + x] = DARK;
            }
        }
    }
    IntensityImage::new(width, height, img, gsd).expect("valid synthetic image")
}

/// Bright scene sprinkled with isolated dark pixels on a regular lattice.
pub fn speckled_scene(width: usize, height: usize, step: usize, gsd: f64) -> IntensityImage {
    let mut img = vec![BRIGHT; width * height];
    for y in (step / 2..height).step_by(step) {
        for x in (step / 2..width).step_by(step) {
            img[y * width + x] = DARK;
        }
    }
    IntensityImage::new(width, height, img, gsd).expect("valid synthetic image")
}
