//! sRGB <-> CIE L*a*b* conversion in the 8-bit layout used by the
//! white balance filter: L scaled to 0..255, a and b offset by 128.
//!
//! Lightness is quantized to a [`GrayImage`] so histogram-based filters can
//! work on it directly; the chroma planes stay in `f32` to avoid a second
//! rounding on the way back.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// D65 reference white (X and Z, Y is 1.0)
const WHITE_X: f32 = 0.950456;
const WHITE_Z: f32 = 1.088754;

/// Linear sRGB to XYZ (D65)
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// XYZ (D65) to linear sRGB
const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240479, -1.537150, -0.498535],
    [-0.969256, 1.875991, 0.041556],
    [0.055648, -0.204043, 1.057311],
];

const EPSILON: f32 = 0.008856;
const KAPPA: f32 = 903.3;

/// Image split into a quantized lightness plane and two float chroma planes
#[derive(Debug, Clone)]
pub struct LabImage {
    /// L scaled to 0..255
    pub lightness: GrayImage,
    /// a + 128, row-major
    pub a: Vec<f32>,
    /// b + 128, row-major
    pub b: Vec<f32>,
}

impl LabImage {
    pub fn dimensions(&self) -> (u32, u32) {
        self.lightness.dimensions()
    }
}

/// Convert an RGB image to the 8-bit Lab layout
pub fn rgb_to_lab(img: &RgbImage) -> LabImage {
    let (width, height) = img.dimensions();
    let linear = srgb_to_linear_table();

    let mut lightness = GrayImage::new(width, height);
    let mut a = Vec::with_capacity((width * height) as usize);
    let mut b = Vec::with_capacity((width * height) as usize);

    for (x, y, pixel) in img.enumerate_pixels() {
        let (l, pa, pb) = lab_from_linear(
            linear[pixel[0] as usize],
            linear[pixel[1] as usize],
            linear[pixel[2] as usize],
        );
        lightness.put_pixel(x, y, Luma([(l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8]));
        a.push(pa + 128.0);
        b.push(pb + 128.0);
    }

    LabImage { lightness, a, b }
}

/// Convert the 8-bit Lab layout back to RGB
pub fn lab_to_rgb(lab: &LabImage) -> RgbImage {
    let (width, height) = lab.dimensions();
    let mut out = RgbImage::new(width, height);

    for (idx, (x, y, l)) in lab.lightness.enumerate_pixels().enumerate() {
        let l = l[0] as f32 * 100.0 / 255.0;
        let (r, g, b) = linear_from_lab(l, lab.a[idx] - 128.0, lab.b[idx] - 128.0);
        out.put_pixel(x, y, Rgb([encode_srgb(r), encode_srgb(g), encode_srgb(b)]));
    }

    out
}

fn srgb_to_linear_table() -> [f32; 256] {
    let mut table = [0.0f32; 256];
    for (i, value) in table.iter_mut().enumerate() {
        let c = i as f32 / 255.0;
        *value = if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        };
    }
    table
}

fn encode_srgb(c: f32) -> u8 {
    let c = c.clamp(0.0, 1.0);
    let encoded = if c <= 0.0031308 {
        12.92 * c
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    };
    (encoded * 255.0).round().clamp(0.0, 255.0) as u8
}

fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

fn lab_f_inv(f: f32) -> f32 {
    let cube = f * f * f;
    if cube > EPSILON {
        cube
    } else {
        (f - 16.0 / 116.0) / 7.787
    }
}

fn lab_from_linear(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let m = &RGB_TO_XYZ;
    let x = (m[0][0] * r + m[0][1] * g + m[0][2] * b) / WHITE_X;
    let y = m[1][0] * r + m[1][1] * g + m[1][2] * b;
    let z = (m[2][0] * r + m[2][1] * g + m[2][2] * b) / WHITE_Z;

    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));
    let l = if y > EPSILON { 116.0 * fy - 16.0 } else { KAPPA * y };

    (l, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

fn linear_from_lab(l: f32, a: f32, b: f32) -> (f32, f32, f32) {
    let fy = (l + 16.0) / 116.0;
    let y = if l > KAPPA * EPSILON { fy * fy * fy } else { l / KAPPA };
    // Keep the chroma offsets relative to the lightness actually used for Y.
    let fy = lab_f(y);
    let x = lab_f_inv(fy + a / 500.0) * WHITE_X;
    let z = lab_f_inv(fy - b / 200.0) * WHITE_Z;

    let m = &XYZ_TO_RGB;
    (
        m[0][0] * x + m[0][1] * y + m[0][2] * z,
        m[1][0] * x + m[1][1] * y + m[1][2] * z,
        m[2][0] * x + m[2][1] * y + m[2][2] * z,
    )
}
