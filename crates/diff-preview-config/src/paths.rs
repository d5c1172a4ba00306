//! Data directory paths
//!
//! Uses XDG directories via `dirs` crate.
//!
//! Platform-specific locations:
//! - Linux: `~/.cache/diff-preview/`
//! - macOS: `~/Library/Caches/diff-preview/`
//! - Windows: `%LOCALAPPDATA%\diff-preview\`

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "diff-preview";

/// Get the application cache directory, creating it if needed
pub fn cache_dir() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("Could not determine cache directory")?;
    let dir = base.join(APP_NAME);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir)
}
