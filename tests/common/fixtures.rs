use image::{ImageBuffer, ImageFormat, Rgb, Rgba};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch space with separate input and output directories.
/// Keep the TempDir alive for as long as the paths are used.
pub struct Workspace {
    pub dir: TempDir,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn create_workspace() -> Workspace {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir_all(&input_dir).expect("Failed to create input dir");
    std::fs::create_dir_all(&output_dir).expect("Failed to create output dir");
    Workspace {
        dir,
        input_dir,
        output_dir,
    }
}

/// Writes a gradient photo with some texture as `<dir>/<name>` (JPEG or PNG by extension)
pub fn create_test_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        let b = if (x / 8 + y / 8) % 2 == 0 { 90 } else { 160 };
        Rgb([r, g, b])
    });
    let path = dir.join(name);
    img.save(&path).expect("Failed to save test photo");
    path
}

/// Writes a semi-transparent RGBA PNG
pub fn create_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x * 3) as u8, (y * 5) as u8, 200u8, 128u8])
    });
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png)
        .expect("Failed to save RGBA test image");
    path
}

/// Dimensions of an image file on disk
pub fn dimensions_of(path: &Path) -> (u32, u32) {
    image::image_dimensions(path).expect("Failed to read output dimensions")
}

/// Names of the files in `dir`, sorted
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Writes a smooth two-axis gradient; compresses with little JPEG error
pub fn create_smooth_photo(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = ImageBuffer::from_fn(width, height, |x, y| {
        let r = 60 + (x * 120 / width.max(1)) as u8;
        let g = 70 + (y * 100 / height.max(1)) as u8;
        Rgb([r, g, 110u8])
    });
    let path = dir.join(name);
    img.save(&path).expect("Failed to save smooth photo");
    path
}

/// Mean absolute per-channel difference of two same-sized images
pub fn mean_abs_diff(a: &image::RgbImage, b: &image::RgbImage) -> f64 {
    assert_eq!(a.dimensions(), b.dimensions(), "images differ in size");
    let total: u64 = a
        .as_raw()
        .iter()
        .zip(b.as_raw())
        .map(|(p, q)| p.abs_diff(*q) as u64)
        .sum();
    total as f64 / a.as_raw().len().max(1) as f64
}
