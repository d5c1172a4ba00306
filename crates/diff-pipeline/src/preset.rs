//! Named sample diffs and the trait for loading them.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The bundled sample diffs, from quick to parse to very slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Small,
    Medium,
    Large,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Small, Preset::Medium, Preset::Large];

    /// Resource name, also the file stem of the preset.
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Small => "small",
            Preset::Medium => "medium",
            Preset::Large => "large",
        }
    }

    /// Button-style label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Preset::Small => "Small preset",
            Preset::Medium => "Medium preset (slow)",
            Preset::Large => "Large preset (very slow)",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| PresetError::Unknown(s.to_string()))
    }
}

/// Errors that can occur when loading a preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// No preset has this name.
    #[error("Unknown preset: {0}")]
    Unknown(String),

    /// The preset resource could not be read.
    #[error("Failed to read preset {preset} from {}: {source}", .path.display())]
    Io {
        preset: Preset,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads preset diff text.
///
/// Failures are returned as-is; callers decide whether to retry or report.
#[async_trait]
pub trait PresetLoader: Send + Sync {
    async fn load(&self, preset: Preset) -> Result<String, PresetError>;
}

/// Reads `<dir>/<name>.diff`.
#[derive(Debug, Clone)]
pub struct FilePresetLoader {
    dir: PathBuf,
}

impl FilePresetLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `preset`.
    pub fn path_for(&self, preset: Preset) -> PathBuf {
        self.dir.join(format!("{}.diff", preset.name()))
    }
}

#[async_trait]
impl PresetLoader for FilePresetLoader {
    async fn load(&self, preset: Preset) -> Result<String, PresetError> {
        let path = self.path_for(preset);
        log::debug!("Loading preset {} from {}", preset, path.display());

        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| PresetError::Io {
                preset,
                path,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_from_str() {
        assert_eq!("small".parse::<Preset>().unwrap(), Preset::Small);
        assert_eq!("LARGE".parse::<Preset>().unwrap(), Preset::Large);
        assert!(matches!(
            "huge".parse::<Preset>(),
            Err(PresetError::Unknown(name)) if name == "huge"
        ));
    }

    #[test]
    fn test_path_for() {
        let loader = FilePresetLoader::new("assets");
        assert_eq!(
            loader.path_for(Preset::Medium),
            PathBuf::from("assets/medium.diff")
        );
    }

    #[tokio::test]
    async fn test_load_existing_preset() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("small.diff"), "--- a\n+++ b\n").unwrap();

        let loader = FilePresetLoader::new(dir.path());
        let text = loader.load(Preset::Small).await.unwrap();
        assert_eq!(text, "--- a\n+++ b\n");
    }

    #[tokio::test]
    async fn test_missing_preset_propagates_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = FilePresetLoader::new(dir.path());

        let err = loader.load(Preset::Large).await.unwrap_err();
        assert!(matches!(err, PresetError::Io { preset: Preset::Large, .. }));
        assert!(err.to_string().contains("large.diff"));
    }
}
