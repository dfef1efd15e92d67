use std::path::PathBuf;

use crate::error::EnhanceError;
use crate::models::{EnhancedArtifacts, Mode};

#[derive(Debug, Clone)]
pub enum Message {
    ModeSelected(Mode),
    SelectImage,
    ImageChosen(Option<PathBuf>),
    Finished(Result<EnhancedArtifacts, EnhanceError>),
}
