use std::path::PathBuf;

/// Failure of a single enhancement run.
///
/// Every variant carries a human-readable message and the whole type is
/// `Clone`, so it can be handed to the UI as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EnhanceError {
    /// The source path is missing or is not a decodable image.
    #[error("Could not read image {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// The image decoded but cannot go through the filters.
    #[error("Unsupported image: {reason}")]
    UnsupportedImage { reason: String },

    /// The source path has no file name to derive output names from.
    #[error("Cannot derive an output name from {}", path.display())]
    InvalidSourcePath { path: PathBuf },

    /// An output artifact could not be written.
    #[error("Failed to write {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    /// The debug dump directory could not be used.
    #[error("Debug output failed: {reason}")]
    Debug { reason: String },

    /// The background task running the pipeline did not complete.
    #[error("Processing task failed: {reason}")]
    Worker { reason: String },
}

pub type Result<T> = std::result::Result<T, EnhanceError>;
