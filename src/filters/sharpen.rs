use image::{Rgb, RgbImage};
use imageproc::filter::gaussian_blur_f32;

/// Gaussian sigma of the unsharp mask
pub const SHARPEN_SIGMA: f32 = 1.2;
/// Weight removed from the blurred copy (the original gets `1 + amount`)
pub const SHARPEN_AMOUNT: f32 = 0.15;

/// Unsharp mask: `(1 + amount) * img - amount * blur(img, sigma)`
pub fn gentle_sharpen(img: &RgbImage, sigma: f32, amount: f32) -> RgbImage {
    if img.width() == 0 || img.height() == 0 {
        return img.clone();
    }

    let blurred = gaussian_blur_f32(img, sigma);

    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let s = img.get_pixel(x, y);
        let b = blurred.get_pixel(x, y);
        let channel = |c: usize| {
            let value = (1.0 + amount) * s[c] as f32 - amount * b[c] as f32;
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb([channel(0), channel(1), channel(2)])
    })
}
