use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Editing style chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Natural,
    Stylized,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Natural, Mode::Stylized];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Natural => "Natural",
            Mode::Stylized => "Stylized",
        }
    }

    /// Whether the warm color tint runs before polishing
    pub fn applies_tint(self) -> bool {
        matches!(self, Mode::Stylized)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "natural" => Ok(Mode::Natural),
            "stylized" => Ok(Mode::Stylized),
            other => Err(format!("unknown mode '{}' (expected natural or stylized)", other)),
        }
    }
}

/// Files written by one successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnhancedArtifacts {
    pub enhanced_path: PathBuf,
    pub comparison_path: PathBuf,
    pub source_size: (u32, u32),
    pub enhanced_size: (u32, u32),
}

impl EnhancedArtifacts {
    /// File name of the enhanced image (without directory)
    pub fn enhanced_file_name(&self) -> String {
        file_name_lossy(&self.enhanced_path)
    }

    /// File name of the comparison image (without directory)
    pub fn comparison_file_name(&self) -> String {
        file_name_lossy(&self.comparison_path)
    }
}

fn file_name_lossy(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
