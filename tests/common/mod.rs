mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from image_enhancer for tests
pub use image_enhancer::{EnhanceError, Enhancer, Mode};
