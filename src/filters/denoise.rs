use image::{GrayImage, Luma, RgbImage};
use rayon::prelude::*;

use super::color::{lab_to_rgb, rgb_to_lab};

/// Non-local means settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenoiseParams {
    /// Filter strength on lightness; larger values smooth more and keep less detail
    pub strength: f32,
    /// Filter strength on the a/b chroma planes
    pub color_strength: f32,
    /// Half size of the comparison patch (2 gives a 5x5 template)
    pub patch_radius: u32,
    /// Half size of the search window (7 gives a 15x15 window)
    pub search_radius: u32,
}

impl Default for DenoiseParams {
    fn default() -> Self {
        Self {
            strength: 3.0,
            color_strength: 3.0,
            patch_radius: 2,
            search_radius: 7,
        }
    }
}

/// Reduce color noise while keeping edges
///
/// The image is split into Lab lightness and chroma. Each part is filtered
/// separately: every pixel becomes a weighted average of the pixels in its
/// search window, weighted by how closely the patch around each candidate
/// matches its own patch. Coordinates outside the image are clamped to the
/// border.
pub fn denoise(img: &RgbImage, params: &DenoiseParams) -> RgbImage {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 || (params.strength <= 0.0 && params.color_strength <= 0.0) {
        return img.clone();
    }

    let window = Window {
        width: width as usize,
        height: height as usize,
        patch_radius: params.patch_radius as usize,
        search_radius: params.search_radius as usize,
    };
    let mut lab = rgb_to_lab(img);

    if params.strength > 0.0 {
        let lightness: Vec<f32> = lab.lightness.pixels().map(|p| p[0] as f32).collect();
        let filtered = nl_means(&[&lightness], &window, params.strength);
        lab.lightness = GrayImage::from_fn(width, height, |x, y| {
            let value = filtered[y as usize * window.width + x as usize];
            Luma([value.round().clamp(0.0, 255.0) as u8])
        });
    }

    if params.color_strength > 0.0 {
        let filtered = nl_means(&[&lab.a, &lab.b], &window, params.color_strength);
        lab.a = filtered.iter().step_by(2).copied().collect();
        lab.b = filtered.iter().skip(1).step_by(2).copied().collect();
    }

    lab_to_rgb(&lab)
}

struct Window {
    width: usize,
    height: usize,
    patch_radius: usize,
    search_radius: usize,
}

/// Planes interleaved into one buffer with a replicated border of `pad` pixels
struct PaddedPlanes {
    data: Vec<f32>,
    stride: usize,
    channels: usize,
}

impl PaddedPlanes {
    fn new(planes: &[&[f32]], width: usize, height: usize, pad: usize) -> Self {
        let channels = planes.len();
        let stride = width + 2 * pad;
        let rows = height + 2 * pad;

        let mut data = Vec::with_capacity(stride * rows * channels);
        for py in 0..rows {
            let y = py.saturating_sub(pad).min(height - 1);
            for px in 0..stride {
                let x = px.saturating_sub(pad).min(width - 1);
                data.extend(planes.iter().map(|plane| plane[y * width + x]));
            }
        }

        Self { data, stride, channels }
    }

    fn pixel(&self, x: usize, y: usize) -> &[f32] {
        let start = (y * self.stride + x) * self.channels;
        &self.data[start..start + self.channels]
    }

    fn distance(&self, a: (usize, usize), b: (usize, usize)) -> f32 {
        self.pixel(a.0, a.1)
            .iter()
            .zip(self.pixel(b.0, b.1))
            .map(|(p, q)| (p - q) * (p - q))
            .sum()
    }
}

/// Non-local means over interleaved planes, returning interleaved output
///
/// Patch distances for one search offset are computed for the whole image at
/// once with sliding box sums, so the cost does not depend on the patch size.
/// Rows are spread over the rayon pool.
fn nl_means(planes: &[&[f32]], window: &Window, strength: f32) -> Vec<f32> {
    let (width, height) = (window.width, window.height);
    let channels = planes.len();
    let r = window.patch_radius;
    let s = window.search_radius;
    let pad = r + s;
    let span = 2 * r + 1;

    let padded = PaddedPlanes::new(planes, width, height, pad);
    let norm = (span * span * channels) as f32;
    let h2 = strength * strength;

    let mut weights = vec![0.0f32; width * height];
    let mut sums = vec![0.0f32; width * height * channels];
    // Horizontal patch sums for the image extended by the patch radius
    let mut row_sums = vec![0.0f32; width * (height + 2 * r)];

    let offset = |pos: usize, delta: isize| pos.wrapping_add_signed(delta);
    let reach = s as isize;

    for dy in -reach..=reach {
        for dx in -reach..=reach {
            row_sums.par_chunks_mut(width).enumerate().for_each(|(ey, out)| {
                // Extended row `ey` sits at padded row `ey + s`.
                let py = ey + s;
                let qy = offset(py, dy);
                let diff = |px: usize| padded.distance((px, py), (offset(px, dx), qy));

                let mut run: f64 = (s..s + span).map(|px| diff(px) as f64).sum();
                out[0] = run as f32;
                for x in 1..width {
                    run += (diff(x + s + 2 * r) - diff(x + s - 1)) as f64;
                    out[x] = run as f32;
                }
            });

            weights
                .par_chunks_mut(width)
                .zip(sums.par_chunks_mut(width * channels))
                .enumerate()
                .for_each(|(y, (weight_row, sum_row))| {
                    let qy = offset(y + pad, dy);
                    for x in 0..width {
                        let distance: f32 = (0..span).map(|k| row_sums[(y + k) * width + x]).sum();
                        let weight = (-(distance.max(0.0) / norm) / h2).exp();
                        let partner = padded.pixel(offset(x + pad, dx), qy);

                        weight_row[x] += weight;
                        for (acc, value) in sum_row[x * channels..(x + 1) * channels].iter_mut().zip(partner) {
                            *acc += weight * value;
                        }
                    }
                });
        }
    }

    sums.par_chunks_mut(channels)
        .zip(weights.par_iter())
        .for_each(|(pixel, total)| pixel.iter_mut().for_each(|v| *v /= *total));
    sums
}
