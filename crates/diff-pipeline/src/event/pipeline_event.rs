//! Events emitted by the orchestrator for the host application to observe.

use crate::job::{DiffOptions, JobId};
use crate::parser::ParseError;

/// Events emitted while processing an action.
///
/// The orchestrator performs no I/O of its own beyond handing jobs to its
/// dispatcher; these events tell the host what changed so it can update a
/// status line, redraw, or log.
///
/// # Example
///
/// ```ignore
/// for event in orchestrator.dispatch(PipelineAction::ParseFinished(outcome)) {
///     match event {
///         PipelineEvent::ResultAccepted { files, .. } => status.success(format!("{files} files")),
///         PipelineEvent::ParseFailed { error, .. } => status.error(error.to_string()),
///         _ => {}
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    /// A new parse job was handed to the worker.
    JobSubmitted {
        job_id: JobId,
        options: DiffOptions,
    },

    /// The pending job's result was installed.
    ResultAccepted {
        job_id: JobId,
        /// Number of files in the new sequence.
        files: usize,
    },

    /// A result arrived for a superseded job and was dropped.
    ResultDiscarded { job_id: JobId },

    /// The pending job failed; the previous sequence stays installed.
    ParseFailed { job_id: JobId, error: ParseError },

    /// One more file was disclosed.
    WindowAdvanced {
        /// Files now disclosed.
        count: usize,
        /// Whether files beyond the window remain.
        has_more: bool,
    },
}
