use std::path::PathBuf;

use crate::error::EnhanceError;
use crate::models::{EnhancedArtifacts, Mode};

/// Where the single enhancement run currently stands
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Status {
    #[default]
    Idle,
    Processing { source: PathBuf },
    Success(EnhancedArtifacts),
    Failed(String),
}

/// How the status label should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Info,
    Success,
    Error,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub mode: Mode,
    pub status: Status,
}

impl AppState {
    pub fn is_processing(&self) -> bool {
        matches!(self.status, Status::Processing { .. })
    }

    /// A new user action clears the previous outcome
    pub fn reset(&mut self) {
        if !self.is_processing() {
            self.status = Status::Idle;
        }
    }

    /// Enter `Processing`; returns false if a run is already in progress
    pub fn begin(&mut self, source: PathBuf) -> bool {
        if self.is_processing() {
            return false;
        }
        self.status = Status::Processing { source };
        true
    }

    pub fn finish(&mut self, result: Result<EnhancedArtifacts, EnhanceError>) {
        self.status = match result {
            Ok(artifacts) => Status::Success(artifacts),
            Err(e) => Status::Failed(e.to_string()),
        };
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            Status::Idle => String::new(),
            Status::Processing { .. } => "Processing...".to_string(),
            Status::Success(artifacts) => format!(
                "Done!\nSaved: {} and {}",
                artifacts.enhanced_file_name(),
                artifacts.comparison_file_name()
            ),
            Status::Failed(message) => format!("Error: {}", message),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self.status {
            Status::Idle => StatusTone::Neutral,
            Status::Processing { .. } => StatusTone::Info,
            Status::Success(_) => StatusTone::Success,
            Status::Failed(_) => StatusTone::Error,
        }
    }
}
