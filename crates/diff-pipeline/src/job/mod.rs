//! Parse jobs and the coordinator that decides which result wins.

mod coordinator;

pub use coordinator::{ParseCoordinator, Resolution};

use crate::model::ParsedDiff;
use crate::parser::{NearbySequences, ParseError, ParseOptions};
use std::fmt;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Token identifying one parse request. Tokens handed out by a coordinator
/// are unique and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(u64);

impl JobId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "job-{}", self.0)
    }
}

/// User-facing parse options. Changing them re-parses the current text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Interleave adjacent deletion/addition runs inside hunks.
    pub zip_nearby_sequences: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            zip_nearby_sequences: true,
        }
    }
}

impl DiffOptions {
    /// Translate into the parser's option set.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            nearby_sequences: self.zip_nearby_sequences.then_some(NearbySequences::Zip),
        }
    }
}

/// A request to parse `diff_text` with `options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseJob {
    pub id: JobId,
    pub diff_text: String,
    pub options: DiffOptions,
}

/// What the worker sends back for a job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub job_id: JobId,
    pub result: Result<ParsedDiff, ParseError>,
}

/// Errors raised when a job cannot be handed to the worker.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Parse worker is not running")]
    WorkerGone,
}

/// Hands parse jobs to whatever executes them out of band.
pub trait ParseDispatch {
    fn dispatch(&self, job: ParseJob) -> Result<(), DispatchError>;
}

impl ParseDispatch for Sender<ParseJob> {
    fn dispatch(&self, job: ParseJob) -> Result<(), DispatchError> {
        self.send(job).map_err(|_| DispatchError::WorkerGone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_maps_to_parser_option() {
        let zip = DiffOptions {
            zip_nearby_sequences: true,
        };
        assert_eq!(
            zip.parse_options().nearby_sequences,
            Some(NearbySequences::Zip)
        );

        let plain = DiffOptions {
            zip_nearby_sequences: false,
        };
        assert_eq!(plain.parse_options().nearby_sequences, None);
    }

    #[test]
    fn test_job_id_display() {
        assert_eq!(JobId::new(7).to_string(), "job-7");
        assert!(JobId::new(1) < JobId::new(2));
    }

    #[test]
    fn test_sender_dispatch_fails_without_receiver() {
        let (tx, rx) = std::sync::mpsc::channel::<ParseJob>();
        drop(rx);

        let job = ParseJob {
            id: JobId::new(1),
            diff_text: String::new(),
            options: DiffOptions::default(),
        };
        assert!(matches!(tx.dispatch(job), Err(DispatchError::WorkerGone)));
    }
}
