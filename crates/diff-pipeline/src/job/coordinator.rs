//! Token-based acceptance of parse results.

use super::{DiffOptions, JobId, ParseDispatch, ParseJob, ParseOutcome};
use crate::model::ParsedDiff;
use crate::parser::ParseError;

/// What happened to an incoming outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The outcome belongs to the pending job and parsed successfully.
    Accepted { job_id: JobId, diff: ParsedDiff },
    /// The outcome belongs to the pending job but parsing failed.
    Failed { job_id: JobId, error: ParseError },
    /// The outcome belongs to a superseded (or already resolved) job.
    Stale { job_id: JobId },
}

/// Tracks the one pending parse job.
///
/// Every submit supersedes earlier jobs without cancelling them; their
/// outcomes are recognised as stale on arrival, in whatever order they come.
pub struct ParseCoordinator<D> {
    dispatcher: D,
    last_id: u64,
    pending: Option<JobId>,
}

impl<D: ParseDispatch> ParseCoordinator<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher,
            last_id: 0,
            pending: None,
        }
    }

    /// Issue a new job and make it the only one whose outcome can be
    /// accepted. A dispatch failure is logged; the job stays pending, so
    /// nothing is ever applied for it.
    pub fn submit(&mut self, diff_text: impl Into<String>, options: DiffOptions) -> JobId {
        self.last_id += 1;
        let id = JobId::new(self.last_id);
        self.pending = Some(id);

        let job = ParseJob {
            id,
            diff_text: diff_text.into(),
            options,
        };
        log::debug!(
            "Submitting {} ({} bytes, zip={})",
            id,
            job.diff_text.len(),
            options.zip_nearby_sequences
        );
        if let Err(e) = self.dispatcher.dispatch(job) {
            log::error!("Failed to dispatch {}: {}", id, e);
        }

        id
    }

    /// Match an outcome against the pending token. A matching outcome
    /// resolves the job, so a generation is applied at most once.
    pub fn resolve(&mut self, outcome: ParseOutcome) -> Resolution {
        let ParseOutcome { job_id, result } = outcome;

        if self.pending != Some(job_id) {
            return Resolution::Stale { job_id };
        }
        self.pending = None;

        match result {
            Ok(diff) => Resolution::Accepted { job_id, diff },
            Err(error) => Resolution::Failed { job_id, error },
        }
    }

    /// The job whose outcome is still awaited, if any.
    pub fn pending(&self) -> Option<JobId> {
        self.pending
    }

    pub fn into_dispatcher(self) -> D {
        self.dispatcher
    }
}
