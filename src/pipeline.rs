use image::RgbImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{EnhanceError, Result};

/// Debug configuration for pipeline execution
#[derive(Clone, Debug)]
pub struct DebugConfig {
    /// Directory receiving one image per stage
    pub output_dir: PathBuf,
}

impl DebugConfig {
    /// Save one stage image as `NN_<name>.png`
    fn save_stage(&self, index: usize, name: &str, image: &RgbImage) -> Result<()> {
        let file_name = format!("{:02}_{}.png", index, name.to_lowercase().replace(' ', "_"));
        let output_path = self.output_dir.join(&file_name);

        image.save(&output_path).map_err(|e| EnhanceError::Debug {
            reason: format!("failed to save {}: {}", output_path.display(), e),
        })?;

        log::debug!("Debug: saved {}", file_name);
        Ok(())
    }
}

/// Context available to all pipeline steps
#[derive(Clone, Default)]
pub struct PipelineContext {
    pub debug: Option<DebugConfig>,
}

/// Trait that all pipeline steps must implement
pub trait PipelineStep: Send + Sync {
    /// Consume one image and return the transformed one
    fn process(&self, image: RgbImage, context: &PipelineContext) -> Result<RgbImage>;

    /// Human-readable name for this step (used in logs and debug file names)
    fn name(&self) -> &str;
}

/// Composable pipeline builder
pub struct Pipeline {
    steps: Vec<Arc<dyn PipelineStep>>,
    context: PipelineContext,
}

impl Pipeline {
    /// Create a new empty pipeline
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            context: PipelineContext::default(),
        }
    }

    /// Enable debug mode with output directory
    /// The directory must be empty or non-existent
    pub fn with_debug(mut self, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        prepare_debug_dir(&output_dir)?;
        self.context.debug = Some(DebugConfig { output_dir });
        Ok(self)
    }

    /// Use an already prepared debug configuration
    pub fn with_debug_config(mut self, debug: Option<DebugConfig>) -> Self {
        self.context.debug = debug;
        self
    }

    /// Add a processing step to the pipeline
    pub fn add_step(mut self, step: Arc<dyn PipelineStep>) -> Self {
        self.steps.push(step);
        self
    }

    /// Helper method to add a step from a Box (for convenience)
    pub fn add_step_boxed(mut self, step: Box<dyn PipelineStep>) -> Self {
        self.steps.push(Arc::from(step));
        self
    }

    /// Names of the configured steps, in execution order
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Run every step in order on the input image
    pub fn run(&self, input: RgbImage) -> Result<RgbImage> {
        if let Some(debug) = &self.context.debug {
            debug.save_stage(0, "input", &input)?;
        }

        let mut image = input;
        for (step_idx, step) in self.steps.iter().enumerate() {
            let (width, height) = image.dimensions();
            log::debug!("Running step: {} ({}x{})", step.name(), width, height);

            image = step.process(image, &self.context)?;

            if let Some(debug) = &self.context.debug {
                debug.save_stage(step_idx + 1, step.name(), &image)?;
            }
        }

        Ok(image)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Make sure `dir` exists and holds nothing
pub(crate) fn prepare_debug_dir(dir: &Path) -> Result<()> {
    let io_error = |e: std::io::Error| EnhanceError::Debug {
        reason: format!("{}: {}", dir.display(), e),
    };

    if dir.exists() {
        let entries = std::fs::read_dir(dir).map_err(io_error)?;
        if entries.count() > 0 {
            return Err(EnhanceError::Debug {
                reason: format!("directory is not empty: {}", dir.display()),
            });
        }
    } else {
        std::fs::create_dir_all(dir).map_err(io_error)?;
    }

    Ok(())
}
