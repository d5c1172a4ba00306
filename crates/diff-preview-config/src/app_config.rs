//! Application configuration
//!
//! Configuration loaded from .diff-preview.toml file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from .diff-preview.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Interleave adjacent deletion/addition runs when parsing
    #[serde(default = "default_zip_nearby_sequences")]
    pub zip_nearby_sequences: bool,

    /// Hide the line-number gutter
    #[serde(default)]
    pub hide_gutter: bool,

    /// Initial layout: "split" or "unified"
    #[serde(default = "default_view_type")]
    pub view_type: String,

    /// Directory holding small.diff, medium.diff and large.diff
    #[serde(default = "default_preset_dir")]
    pub preset_dir: String,
}

fn default_zip_nearby_sequences() -> bool {
    true
}

fn default_view_type() -> String {
    "split".to_string()
}

fn default_preset_dir() -> String {
    "assets".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            zip_nearby_sequences: default_zip_nearby_sequences(),
            hide_gutter: false,
            view_type: default_view_type(),
            preset_dir: default_preset_dir(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    /// Load config from an explicit path. Unlike [`AppConfig::load`], a
    /// missing or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        log::info!("Loaded app config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.zip_nearby_sequences);
        assert!(!config.hide_gutter);
        assert_eq!(config.view_type, "split");
        assert_eq!(config.preset_dir, "assets");
    }

    #[test]
    fn test_config_deserialize() {
        let toml = r#"
            zip_nearby_sequences = false
            hide_gutter = true
            view_type = "unified"
            preset_dir = "/srv/diffs"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(!config.zip_nearby_sequences);
        assert!(config.hide_gutter);
        assert_eq!(config.view_type, "unified");
        assert_eq!(config.preset_dir, "/srv/diffs");
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            view_type = "unified"
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.view_type, "unified");
        // Other fields should use defaults
        assert!(config.zip_nearby_sequences);
        assert!(!config.hide_gutter);
        assert_eq!(config.preset_dir, "assets");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "hide_gutter = true\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert!(config.hide_gutter);
        assert_eq!(config.view_type, "split");
    }

    #[test]
    fn test_load_from_malformed_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "hide_gutter = \"maybe\"\n").unwrap();

        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
