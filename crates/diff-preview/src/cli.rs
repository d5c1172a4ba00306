use anyhow::{Context, Result};
use clap::Parser;
use diff_pipeline::Preset;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "diff-preview",
    version,
    about = "Preview a unified diff, parsed in the background and shown file by file"
)]
pub struct Args {
    /// Old side of a text comparison (requires --new)
    #[arg(long, value_name = "FILE", requires = "new", conflicts_with_all = ["diff", "preset"])]
    pub old: Option<PathBuf>,

    /// New side of a text comparison (requires --old)
    #[arg(long, value_name = "FILE", requires = "old")]
    pub new: Option<PathBuf>,

    /// Open an existing unified diff
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    pub diff: Option<PathBuf>,

    /// Start with a bundled preset: small, medium or large
    #[arg(long, value_name = "NAME")]
    pub preset: Option<Preset>,

    /// Read configuration from this file instead of .diff-preview.toml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start with nearby-sequence zipping disabled
    #[arg(long, default_value_t = false)]
    pub no_zip: bool,

    /// Start in the unified layout
    #[arg(long, default_value_t = false)]
    pub unified: bool,

    /// Start with the line-number gutter hidden
    #[arg(long, default_value_t = false)]
    pub hide_gutter: bool,
}

/// What the preview shows first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialInput {
    Texts { old_text: String, new_text: String },
    Diff(String),
    Preset(Preset),
}

/// The two files of a text comparison. They are read again on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSources {
    pub old: PathBuf,
    pub new: PathBuf,
}

impl TextSources {
    pub fn read(&self) -> Result<InitialInput> {
        Ok(InitialInput::Texts {
            old_text: read_input(&self.old)?,
            new_text: read_input(&self.new)?,
        })
    }
}

impl Args {
    /// Read the files named on the command line. Without any input flag
    /// the small preset is shown.
    pub fn initial_input(&self) -> Result<InitialInput> {
        if let Some(sources) = self.text_sources() {
            return sources.read();
        }

        if let Some(diff) = &self.diff {
            return Ok(InitialInput::Diff(read_input(diff)?));
        }

        Ok(InitialInput::Preset(self.preset.unwrap_or(Preset::Small)))
    }

    pub fn text_sources(&self) -> Option<TextSources> {
        match (&self.old, &self.new) {
            (Some(old), Some(new)) => Some(TextSources {
                old: old.clone(),
                new: new.clone(),
            }),
            _ => None,
        }
    }
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::OsString;

    #[test]
    fn test_defaults_to_small_preset() {
        let args = Args::try_parse_from(["diff-preview"]).unwrap();
        assert_eq!(
            args.initial_input().unwrap(),
            InitialInput::Preset(Preset::Small)
        );
        assert!(!args.no_zip);
        assert!(!args.unified);
        assert!(!args.hide_gutter);
        assert_eq!(args.text_sources(), None);
    }

    #[test]
    fn test_preset_by_name() {
        let args = Args::try_parse_from(["diff-preview", "--preset", "Large"]).unwrap();
        assert_eq!(
            args.initial_input().unwrap(),
            InitialInput::Preset(Preset::Large)
        );
    }

    #[test]
    fn test_unknown_preset_is_rejected() {
        assert!(Args::try_parse_from(["diff-preview", "--preset", "huge"]).is_err());
    }

    #[test]
    fn test_old_requires_new() {
        assert!(Args::try_parse_from(["diff-preview", "--old", "a.txt"]).is_err());
    }

    #[test]
    fn test_texts_conflict_with_diff() {
        let result = Args::try_parse_from([
            "diff-preview",
            "--old",
            "a.txt",
            "--new",
            "b.txt",
            "--diff",
            "c.diff",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reads_text_pair() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.txt");
        let new = dir.path().join("new.txt");
        std::fs::write(&old, "a\n").unwrap();
        std::fs::write(&new, "b\n").unwrap();

        let args = Args::try_parse_from([
            OsString::from("diff-preview"),
            OsString::from("--old"),
            old.into_os_string(),
            OsString::from("--new"),
            new.clone().into_os_string(),
        ])
        .unwrap();

        assert_eq!(args.text_sources().map(|s| s.new), Some(new));

        assert_eq!(
            args.initial_input().unwrap(),
            InitialInput::Texts {
                old_text: "a\n".to_string(),
                new_text: "b\n".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_diff_file_reports_path() {
        let args = Args::try_parse_from(["diff-preview", "--diff", "/nonexistent/x.diff"]).unwrap();
        let err = args.initial_input().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/x.diff"));
    }
}
