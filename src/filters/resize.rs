use image::RgbImage;
use image::imageops::{self, FilterType};

/// Default enlargement factor of the pipeline
pub const UPSCALE_FACTOR: f32 = 1.5;

/// Target size for `scale`: each side multiplied and rounded down, never below 1
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let side = |len: u32| ((len as f64 * scale as f64).floor() as u32).max(1);
    (side(width), side(height))
}

/// Resize by `scale` with bicubic (Catmull-Rom) interpolation
pub fn upscale(img: &RgbImage, scale: f32) -> RgbImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return img.clone();
    }

    let (new_w, new_h) = scaled_dimensions(width, height, scale);
    if (new_w, new_h) == (width, height) {
        return img.clone();
    }

    imageops::resize(img, new_w, new_h, FilterType::CatmullRom)
}
