use crate::error::{EnhanceError, Result};
use crate::filters::{denoise, polish, resize, sharpen, tint, white_balance};
use crate::pipeline::{PipelineContext, PipelineStep};
use image::RgbImage;

/// Non-local means denoising
pub struct DenoiseStep {
    pub params: denoise::DenoiseParams,
}

impl PipelineStep for DenoiseStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        Ok(denoise::denoise(&image, &self.params))
    }

    fn name(&self) -> &str {
        "Denoise"
    }
}

/// CLAHE on the Lab lightness channel
pub struct WhiteBalanceStep {
    pub params: white_balance::ClaheParams,
}

impl PipelineStep for WhiteBalanceStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        Ok(white_balance::white_balance(&image, &self.params))
    }

    fn name(&self) -> &str {
        "White Balance"
    }
}

/// Unsharp mask with a small Gaussian
pub struct SharpenStep {
    pub sigma: f32,
    pub amount: f32,
}

impl PipelineStep for SharpenStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        Ok(sharpen::gentle_sharpen(&image, self.sigma, self.amount))
    }

    fn name(&self) -> &str {
        "Gentle Sharpen"
    }
}

/// Bicubic enlargement by a fixed factor
pub struct UpscaleStep {
    pub scale: f32,
}

impl PipelineStep for UpscaleStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(EnhanceError::UnsupportedImage {
                reason: format!("invalid upscale factor {}", self.scale),
            });
        }
        Ok(resize::upscale(&image, self.scale))
    }

    fn name(&self) -> &str {
        "Upscale"
    }
}

/// Warm red/green tint
pub struct StylizeTintStep;

impl PipelineStep for StylizeTintStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        Ok(tint::stylize_tint(&image))
    }

    fn name(&self) -> &str {
        "Stylize Tint"
    }
}

/// Sharpness, brightness, saturation and contrast factors
pub struct PolishStep {
    pub params: polish::PolishParams,
}

impl PipelineStep for PolishStep {
    fn process(&self, image: RgbImage, _context: &PipelineContext) -> Result<RgbImage> {
        Ok(polish::polish(&image, &self.params))
    }

    fn name(&self) -> &str {
        "Tonal Polish"
    }
}
