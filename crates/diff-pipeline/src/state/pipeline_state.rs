//! State republished to the consumer after every action.

use crate::disclosure::DisclosureWindow;
use crate::job::DiffOptions;
use crate::model::{FileDiff, ParsedDiff};
use std::fmt;
use std::str::FromStr;

/// How a file diff is laid out. Purely presentational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewType {
    #[default]
    Split,
    Unified,
}

impl ViewType {
    pub fn toggled(self) -> Self {
        match self {
            ViewType::Split => ViewType::Unified,
            ViewType::Unified => ViewType::Split,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Split => "split",
            ViewType::Unified => "unified",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "split" => Ok(ViewType::Split),
            "unified" => Ok(ViewType::Unified),
            other => Err(format!("Unknown view type: {}", other)),
        }
    }
}

/// The two inputs whose changes trigger a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseInputs<'a> {
    pub diff_text: &'a str,
    pub options: DiffOptions,
}

/// Whether moving from `previous` to `next` needs a new parse job.
///
/// Any difference in the text or the options does; re-setting the same
/// values does not.
pub fn should_submit(previous: &ParseInputs<'_>, next: &ParseInputs<'_>) -> bool {
    previous.diff_text != next.diff_text || previous.options != next.options
}

/// Everything the consumer sees: inputs, the installed sequence and the
/// disclosed prefix of it.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    /// The diff text currently acted on.
    pub raw_diff_text: String,
    /// Options for the next parse.
    pub options: DiffOptions,
    /// Last accepted parse result.
    pub parsed: ParsedDiff,
    /// How many leading files of `parsed` are exposed.
    pub window: DisclosureWindow,
    /// Failure of the most recent job, if it failed. The previous sequence
    /// stays installed.
    pub last_error: Option<String>,
    /// Layout for rendering.
    pub view_type: ViewType,
    /// Hide line-number gutters when rendering.
    pub hide_gutter: bool,
}

impl PipelineState {
    pub fn new(options: DiffOptions, view_type: ViewType, hide_gutter: bool) -> Self {
        Self {
            options,
            view_type,
            hide_gutter,
            ..Self::default()
        }
    }

    pub fn inputs(&self) -> ParseInputs<'_> {
        ParseInputs {
            diff_text: &self.raw_diff_text,
            options: self.options,
        }
    }

    /// Replace the sequence wholesale and reset the window.
    pub fn install(&mut self, parsed: ParsedDiff) {
        self.window = DisclosureWindow::reset(parsed.len());
        self.parsed = parsed;
        self.last_error = None;
    }

    /// The disclosed prefix of the installed sequence.
    ///
    /// A window wider than the sequence exposes the whole sequence.
    pub fn visible_files(&self) -> &[FileDiff] {
        let files = &self.parsed.files;
        files.get(..self.window.count()).unwrap_or(files)
    }

    pub fn has_more(&self) -> bool {
        self.window.has_more(self.parsed.len())
    }

    pub fn total_files(&self) -> usize {
        self.parsed.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(files: usize) -> ParsedDiff {
        ParsedDiff::from_files(
            (0..files)
                .map(|i| FileDiff::new(format!("o{i}"), format!("n{i}"), "a", "b"))
                .collect(),
        )
    }

    #[test]
    fn test_should_submit_on_text_change() {
        let options = DiffOptions::default();
        let prev = ParseInputs {
            diff_text: "one",
            options,
        };
        let next = ParseInputs {
            diff_text: "two",
            options,
        };
        assert!(should_submit(&prev, &next));
        assert!(!should_submit(&prev, &prev));
    }

    #[test]
    fn test_should_submit_on_option_change_only() {
        let prev = ParseInputs {
            diff_text: "same",
            options: DiffOptions {
                zip_nearby_sequences: true,
            },
        };
        let next = ParseInputs {
            diff_text: "same",
            options: DiffOptions {
                zip_nearby_sequences: false,
            },
        };
        assert!(should_submit(&prev, &next));
    }

    #[test]
    fn test_install_resets_window() {
        let mut state = PipelineState::default();
        state.install(parsed(4));
        state.window = state.window.advance(4).advance(4);
        assert_eq!(state.visible_files().len(), 3);

        state.install(parsed(2));
        assert_eq!(state.visible_files().len(), 1);
        assert!(state.has_more());

        state.install(parsed(0));
        assert!(state.visible_files().is_empty());
        assert!(!state.has_more());
    }

    #[test]
    fn test_visible_files_tolerates_wide_window() {
        let mut state = PipelineState::default();
        state.install(parsed(3));
        state.window = state.window.advance(3).advance(3);
        assert_eq!(state.visible_files().len(), 3);

        state.parsed = parsed(1);
        assert_eq!(state.visible_files().len(), 1);

        state.parsed = ParsedDiff::default();
        assert!(state.visible_files().is_empty());
    }

    #[test]
    fn test_install_clears_error() {
        let mut state = PipelineState {
            last_error: Some("boom".to_string()),
            ..PipelineState::default()
        };
        state.install(parsed(1));
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_view_type_parse_and_toggle() {
        assert_eq!("Unified".parse::<ViewType>().unwrap(), ViewType::Unified);
        assert!("diagonal".parse::<ViewType>().is_err());
        assert_eq!(ViewType::Split.toggled(), ViewType::Unified);
        assert_eq!(ViewType::default(), ViewType::Split);
    }
}
