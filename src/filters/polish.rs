//! Final tonal polish.
//!
//! Each adjustment blends the image with a "degenerate" version of itself:
//! `out = degenerate + factor * (image - degenerate)`. A factor of 1.0 leaves
//! the image as it is, larger values push it away from the degenerate.

use image::{Rgb, RgbImage};

use crate::models::Mode;

/// Enhancement factors applied by [`polish`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolishParams {
    pub sharpness: f32,
    pub brightness: f32,
    pub saturation: f32,
    pub contrast: f32,
}

impl PolishParams {
    /// Factors used for each editing mode
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Natural => Self {
                sharpness: 1.05,
                brightness: 1.02,
                saturation: 1.0,
                contrast: 1.08,
            },
            Mode::Stylized => Self {
                sharpness: 1.15,
                brightness: 1.08,
                saturation: 1.15,
                contrast: 1.10,
            },
        }
    }
}

impl Default for PolishParams {
    fn default() -> Self {
        Self::for_mode(Mode::default())
    }
}

/// Apply sharpness, brightness, saturation and contrast, in that order
pub fn polish(img: &RgbImage, params: &PolishParams) -> RgbImage {
    let mut out = img.clone();
    if params.sharpness != 1.0 {
        out = adjust_sharpness(&out, params.sharpness);
    }
    if params.brightness != 1.0 {
        out = adjust_brightness(&out, params.brightness);
    }
    if params.saturation != 1.0 {
        out = adjust_saturation(&out, params.saturation);
    }
    if params.contrast != 1.0 {
        out = adjust_contrast(&out, params.contrast);
    }
    out
}

/// Blend against a 3x3 smoothed copy (center 5, neighbours 1)
pub fn adjust_sharpness(img: &RgbImage, factor: f32) -> RgbImage {
    let smooth = smooth3x3(img);
    blend_with(img, factor, |x, y, c| smooth.get_pixel(x, y)[c] as f32)
}

/// Blend against black, i.e. scale every channel
pub fn adjust_brightness(img: &RgbImage, factor: f32) -> RgbImage {
    blend_with(img, factor, |_, _, _| 0.0)
}

/// Blend against the per-pixel luma gray
pub fn adjust_saturation(img: &RgbImage, factor: f32) -> RgbImage {
    blend_with(img, factor, |x, y, _| luma(img.get_pixel(x, y)) as f32)
}

/// Blend against a uniform gray at the mean luma
pub fn adjust_contrast(img: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(img).round();
    blend_with(img, factor, |_, _, _| mean)
}

/// ITU-R 601-2 luma, rounded to 8 bits
pub fn luma(p: &Rgb<u8>) -> u8 {
    let weighted = p[0] as u32 * 19595 + p[1] as u32 * 38470 + p[2] as u32 * 7471;
    ((weighted + 0x8000) >> 16) as u8
}

fn mean_luma(img: &RgbImage) -> f32 {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return 0.0;
    }
    let total: u64 = img.pixels().map(|p| luma(p) as u64).sum();
    total as f32 / count as f32
}

fn blend_with(img: &RgbImage, factor: f32, degenerate: impl Fn(u32, u32, usize) -> f32) -> RgbImage {
    RgbImage::from_fn(img.width(), img.height(), |x, y| {
        let p = img.get_pixel(x, y);
        let channel = |c: usize| {
            let base = degenerate(x, y, c);
            (base + factor * (p[c] as f32 - base)).round().clamp(0.0, 255.0) as u8
        };
        Rgb([channel(0), channel(1), channel(2)])
    })
}

/// Smoothing kernel [[1,1,1],[1,5,1],[1,1,1]] / 13; border pixels are copied
fn smooth3x3(img: &RgbImage) -> RgbImage {
    let (width, height) = img.dimensions();
    let mut out = img.clone();
    if width < 3 || height < 3 {
        return out;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut acc = [0u32; 3];
            for ky in 0..3 {
                for kx in 0..3 {
                    let weight = if kx == 1 && ky == 1 { 5 } else { 1 };
                    let p = img.get_pixel(x + kx - 1, y + ky - 1);
                    for c in 0..3 {
                        acc[c] += weight * p[c] as u32;
                    }
                }
            }
            out.put_pixel(
                x,
                y,
                Rgb([
                    ((acc[0] as f32) / 13.0).round() as u8,
                    ((acc[1] as f32) / 13.0).round() as u8,
                    ((acc[2] as f32) / 13.0).round() as u8,
                ]),
            );
        }
    }

    out
}
