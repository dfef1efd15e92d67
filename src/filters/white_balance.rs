use image::{GrayImage, RgbImage};

use super::color::{lab_to_rgb, rgb_to_lab};

/// Contrast-limited adaptive histogram equalization settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaheParams {
    /// Histogram clip limit, relative to a flat histogram
    pub clip_limit: f32,
    /// Number of tiles along x and y
    pub tiles: (usize, usize),
}

impl Default for ClaheParams {
    fn default() -> Self {
        Self {
            clip_limit: 1.3,
            tiles: (8, 8),
        }
    }
}

/// Balance local contrast on lightness only
///
/// Converts to Lab, equalizes L with CLAHE and converts back; the a and b
/// planes pass through unchanged.
pub fn white_balance(img: &RgbImage, params: &ClaheParams) -> RgbImage {
    let mut lab = rgb_to_lab(img);
    lab.lightness = equalize_lightness(&lab.lightness, params);
    lab_to_rgb(&lab)
}

/// CLAHE on a single 8-bit plane
pub fn equalize_lightness(plane: &GrayImage, params: &ClaheParams) -> GrayImage {
    if plane.width() == 0 || plane.height() == 0 {
        return plane.clone();
    }

    let (tiles_x, tiles_y) = params.tiles;
    clahe::clahe_u8_to_u8(tiles_x.max(1), tiles_y.max(1), params.clip_limit, plane)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn keeps_dimensions() {
        let img = RgbImage::from_fn(37, 21, |x, y| Rgb([(x * 6) as u8, (y * 10) as u8, 90]));
        assert_eq!(white_balance(&img, &ClaheParams::default()).dimensions(), (37, 21));
    }

    #[test]
    fn gray_input_stays_gray() {
        let img = RgbImage::from_fn(40, 40, |x, y| {
            let v = (60 + x + y) as u8;
            Rgb([v, v, v])
        });

        let out = white_balance(&img, &ClaheParams::default());
        for p in out.pixels() {
            let spread = p[0].max(p[1]).max(p[2]) - p[0].min(p[1]).min(p[2]);
            assert!(spread <= 1, "gray pixel picked up color: {:?}", p);
        }
    }

    #[test]
    fn flat_image_stays_flat() {
        let img = RgbImage::from_pixel(16, 16, Rgb([150, 110, 90]));
        let out = white_balance(&img, &ClaheParams::default());
        let first = *out.get_pixel(0, 0);
        assert!(out.pixels().all(|p| *p == first));
    }

    #[test]
    fn constant_plane_is_untouched() {
        let plane = GrayImage::from_pixel(32, 24, Luma([120]));
        assert_eq!(equalize_lightness(&plane, &ClaheParams::default()), plane);
    }

    #[test]
    fn low_contrast_ramp_is_stretched() {
        let plane = GrayImage::from_fn(64, 64, |x, _| Luma([100 + (x / 8) as u8]));
        let params = ClaheParams { clip_limit: 40.0, tiles: (1, 1) };
        let out = equalize_lightness(&plane, &params);

        let out_min = out.pixels().map(|p| p[0]).min().unwrap();
        let out_max = out.pixels().map(|p| p[0]).max().unwrap();
        assert!(out_max - out_min > 7, "range only grew to {}..{}", out_min, out_max);
    }

    #[test]
    fn planes_smaller_than_the_tile_grid() {
        let plane = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 40 + y * 10) as u8]));
        assert_eq!(equalize_lightness(&plane, &ClaheParams::default()).dimensions(), (3, 2));

        let empty = GrayImage::new(0, 5);
        assert_eq!(equalize_lightness(&empty, &ClaheParams::default()).dimensions(), (0, 5));
    }
}
