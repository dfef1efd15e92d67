use image::{Rgb, RgbImage};
use imageproc::map::map_colors;

/// Red and green offsets of the warm tint
pub const WARM_TINT: (u8, u8) = (10, 5);

/// Shift the color balance warmer, saturating at 255; blue is left alone
pub fn stylize_tint(img: &RgbImage) -> RgbImage {
    let (red, green) = WARM_TINT;
    map_colors(img, |p: Rgb<u8>| {
        Rgb([p[0].saturating_add(red), p[1].saturating_add(green), p[2]])
    })
}
