//! # diff-pipeline
//!
//! Produces unified diffs, parses them off the interactive thread, and
//! discloses the parsed files to a consumer one at a time.
//!
//! ## Design Principles
//!
//! The crate is **instrumented**: the orchestrator receives actions and
//! emits events, and the only work it hands off is a parse job through the
//! [`ParseDispatch`] seam. This keeps it:
//!
//! - Testable without threads (a plain channel sender is a dispatcher)
//! - Independent of any particular front-end
//! - Correct under out-of-order worker replies, because acceptance is
//!   decided by job token alone
//!
//! ## Pipeline
//!
//! 1. [`synthesize`] turns two texts into a git-style unified diff.
//! 2. [`ParseCoordinator`] issues a fresh [`JobId`] per submit and accepts
//!    only the outcome carrying the latest one.
//! 3. [`ParseWorker`] parses on a long-lived thread and sends outcomes back.
//! 4. [`DisclosureWindow`] exposes a growing prefix of the parsed files.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use diff_pipeline::{Orchestrator, ParseWorker, PipelineAction, PipelineState};
//! use std::sync::mpsc::channel;
//!
//! let (outcome_tx, outcome_rx) = channel();
//! let worker = ParseWorker::spawn(outcome_tx)?;
//! let mut orchestrator = Orchestrator::new(worker, PipelineState::default());
//!
//! orchestrator.dispatch(PipelineAction::SubmitTexts { old_text, new_text });
//!
//! // In the host's event loop:
//! while let Ok(outcome) = outcome_rx.try_recv() {
//!     orchestrator.dispatch(PipelineAction::ParseFinished(outcome));
//! }
//! for file in orchestrator.state().visible_files() {
//!     // render file
//! }
//! if near_bottom && orchestrator.state().has_more() {
//!     orchestrator.dispatch(PipelineAction::LoadMore);
//! }
//! ```

pub mod action;
pub mod disclosure;
pub mod event;
pub mod hash;
pub mod job;
pub mod model;
pub mod orchestrator;
pub mod parser;
pub mod preset;
pub mod state;
pub mod synth;
pub mod worker;

// Re-export commonly used types
pub use action::PipelineAction;
pub use disclosure::DisclosureWindow;
pub use event::PipelineEvent;
pub use job::{
    DiffOptions, DispatchError, JobId, ParseCoordinator, ParseDispatch, ParseJob, ParseOutcome,
    Resolution,
};
pub use model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, ParsedDiff};
pub use orchestrator::Orchestrator;
pub use parser::{parse_unified_diff, NearbySequences, ParseError, ParseOptions};
pub use preset::{FilePresetLoader, Preset, PresetError, PresetLoader};
pub use state::{should_submit, ParseInputs, PipelineState, ViewType};
pub use synth::synthesize;
pub use worker::ParseWorker;
