//! Pipeline Actions
//!
//! Tagged actions the orchestrator processes. The host application maps its
//! own inputs (key presses, CLI arguments, worker messages, finished preset
//! loads) to these and dispatches them.

use crate::job::ParseOutcome;
use crate::preset::Preset;
use crate::state::ViewType;

/// Actions that can be dispatched to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineAction {
    // === Diff input ===
    /// Two revisions were submitted; synthesize a diff from them
    SubmitTexts { old_text: String, new_text: String },
    /// A raw unified diff was supplied directly
    SetDiffText(String),
    /// A preset finished loading
    PresetLoaded { preset: Preset, text: String },

    // === Parse options ===
    /// Set whether nearby sequences are zipped
    SetZipNearbySequences(bool),
    /// Flip the zip option
    ToggleZipNearbySequences,

    // === Worker ===
    /// The parse worker answered a job
    ParseFinished(ParseOutcome),

    // === Disclosure ===
    /// The consumer is close to the end of the disclosed files
    LoadMore,

    // === Presentation ===
    /// Show or hide line-number gutters
    ToggleGutter,
    /// Switch between split and unified layout
    SetViewType(ViewType),
    /// Flip the layout
    ToggleViewType,
}
