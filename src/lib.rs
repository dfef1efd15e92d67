pub mod enhancer;
pub mod error;
pub mod filters;
pub mod models;
pub mod pipeline;

pub use enhancer::{Enhancer, enhance};
pub use error::EnhanceError;
pub use models::{EnhancedArtifacts, Mode};
pub use pipeline::{DebugConfig, Pipeline, PipelineContext, PipelineStep};

#[cfg(feature = "gui")]
pub mod gui;
