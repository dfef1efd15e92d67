pub mod color;
pub mod denoise;
pub mod polish;
pub mod resize;
pub mod sharpen;
pub mod steps;
pub mod tint;
pub mod white_balance;

pub use denoise::{DenoiseParams, denoise};
pub use polish::{PolishParams, polish};
pub use resize::{UPSCALE_FACTOR, upscale};
pub use sharpen::{SHARPEN_AMOUNT, SHARPEN_SIGMA, gentle_sharpen};
pub use tint::stylize_tint;
pub use white_balance::{ClaheParams, equalize_lightness, white_balance};

use crate::models::Mode;
use crate::pipeline::Pipeline;
use std::sync::Arc;

/// Build the filter chain that runs before polishing
///
/// Denoise, white balance, sharpen and upscale always run; the warm tint is
/// added for [`Mode::Stylized`]. The output of this pipeline is what the
/// comparison image shows next to the original.
pub fn build_filter_pipeline(mode: Mode, scale: f32) -> Pipeline {
    use steps::*;

    let pipeline = Pipeline::new()
        .add_step(Arc::new(DenoiseStep { params: DenoiseParams::default() }))
        .add_step(Arc::new(WhiteBalanceStep { params: ClaheParams::default() }))
        .add_step(Arc::new(SharpenStep {
            sigma: SHARPEN_SIGMA,
            amount: SHARPEN_AMOUNT,
        }))
        .add_step(Arc::new(UpscaleStep { scale }));

    if mode.applies_tint() {
        pipeline.add_step(Arc::new(StylizeTintStep))
    } else {
        pipeline
    }
}

/// Build the single-step polish pipeline for a mode
pub fn build_polish_pipeline(mode: Mode) -> Pipeline {
    Pipeline::new().add_step(Arc::new(steps::PolishStep {
        params: PolishParams::for_mode(mode),
    }))
}
