use image::{ImageFormat, ImageReader, RgbImage};
use std::path::{Path, PathBuf};

use crate::error::{EnhanceError, Result};
use crate::filters::{self, UPSCALE_FACTOR};
use crate::models::{EnhancedArtifacts, Mode};
use crate::pipeline::{DebugConfig, prepare_debug_dir};

/// Enhancement orchestrator: decode, filter, polish, write both artifacts
#[derive(Debug, Clone)]
pub struct Enhancer {
    /// Directory receiving the artifacts (current directory when `None`)
    pub output_dir: Option<PathBuf>,
    pub scale: f32,
    pub debug: Option<DebugConfig>,
}

impl Enhancer {
    pub fn new() -> Self {
        Self {
            output_dir: None,
            scale: UPSCALE_FACTOR,
            debug: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Dump every stage into `dir`, which must be empty or non-existent
    pub fn with_debug(mut self, dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = dir.into();
        prepare_debug_dir(&output_dir)?;
        self.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Run the whole enhancement on one file
    pub fn enhance(&self, source: &Path, mode: Mode) -> Result<EnhancedArtifacts> {
        log::info!("Enhancing {} ({})", source.display(), mode);

        let original = load_image(source)?;
        let base_name = base_name(source)?;
        let output_dir = self.resolve_output_dir()?;

        let run_name = format!("{}_{}", base_name, mode);

        let filtered = filters::build_filter_pipeline(mode, self.scale)
            .with_debug_config(self.stage_debug(&run_name, "filters")?)
            .run(original.clone())?;

        let polished = filters::build_polish_pipeline(mode)
            .with_debug_config(self.stage_debug(&run_name, "polish")?)
            .run(filtered.clone())?;

        let enhanced_path = output_dir.join(format!("{}.jpg", run_name));
        save_jpeg(&polished, &enhanced_path)?;
        log::info!("Saved {}", enhanced_path.display());

        let comparison_path = output_dir.join(format!("{}_compare.jpg", base_name));
        save_jpeg(&side_by_side(&original, &filtered), &comparison_path)?;
        log::info!("Saved {}", comparison_path.display());

        Ok(EnhancedArtifacts {
            enhanced_path,
            comparison_path,
            source_size: original.dimensions(),
            enhanced_size: polished.dimensions(),
        })
    }

    fn resolve_output_dir(&self) -> Result<PathBuf> {
        match &self.output_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(|e| EnhanceError::Encode {
                path: PathBuf::from("."),
                reason: format!("cannot resolve the working directory: {}", e),
            }),
        }
    }

    /// Stage directory `<debug>/<stem>_<Mode>/<pipeline>`
    ///
    /// Each file and mode gets its own directory; running the same pair again
    /// overwrites its stage images.
    fn stage_debug(&self, run_name: &str, pipeline: &str) -> Result<Option<DebugConfig>> {
        let Some(debug) = &self.debug else {
            return Ok(None);
        };

        let output_dir = debug.output_dir.join(run_name).join(pipeline);
        std::fs::create_dir_all(&output_dir).map_err(|e| EnhanceError::Debug {
            reason: format!("{}: {}", output_dir.display(), e),
        })?;
        Ok(Some(DebugConfig { output_dir }))
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new()
    }
}

/// Enhance `source` with default settings, writing into the current directory
pub fn enhance(source: impl AsRef<Path>, mode: Mode) -> Result<EnhancedArtifacts> {
    Enhancer::new().enhance(source.as_ref(), mode)
}

/// Decode any supported image into 8-bit RGB
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let decode_error = |reason: String| EnhanceError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let img = ImageReader::open(path)
        .map_err(|e| decode_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| decode_error(e.to_string()))?
        .decode()
        .map_err(|e| decode_error(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(EnhanceError::UnsupportedImage {
            reason: format!("{} has no pixels", path.display()),
        });
    }

    log::debug!("Image loaded: {}x{}", img.width(), img.height());
    Ok(img.to_rgb8())
}

/// File name without directory and extension
pub fn base_name(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| EnhanceError::InvalidSourcePath {
            path: path.to_path_buf(),
        })
}

/// Place `left` and `right` next to each other, top-aligned, on a black canvas
pub fn side_by_side(left: &RgbImage, right: &RgbImage) -> RgbImage {
    let width = left.width() + right.width();
    let height = left.height().max(right.height());

    let mut canvas = RgbImage::new(width, height);
    image::imageops::overlay(&mut canvas, left, 0, 0);
    image::imageops::overlay(&mut canvas, right, left.width().into(), 0);
    canvas
}

fn save_jpeg(img: &RgbImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| EnhanceError::Encode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
