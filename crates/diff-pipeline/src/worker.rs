//! Long-lived parse worker thread.
//!
//! The worker owns nothing but its two channel ends:
//! - jobs arrive on a point-to-point channel from the coordinator
//! - outcomes go back on a channel the host polls from its own loop
//!
//! One worker serves every job for the lifetime of the host. When several
//! jobs are queued it parses only the newest one; the others are already
//! superseded and their outcomes would be discarded anyway.

use crate::job::{DispatchError, ParseDispatch, ParseJob, ParseOutcome};
use crate::parser::parse_unified_diff;
use std::io;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Handle to the parse worker thread.
pub struct ParseWorker {
    jobs: Option<Sender<ParseJob>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ParseWorker {
    /// Spawn the worker thread. Outcomes are sent to `outcome_tx`.
    pub fn spawn(outcome_tx: Sender<ParseOutcome>) -> io::Result<Self> {
        let (job_tx, job_rx) = channel();
        let thread = thread::Builder::new()
            .name("diff-parse-worker".to_string())
            .spawn(move || worker_loop(job_rx, outcome_tx))?;

        Ok(Self {
            jobs: Some(job_tx),
            thread: Some(thread),
        })
    }

    /// Close the job channel and wait for the in-flight job to finish.
    pub fn shutdown(mut self) {
        self.jobs.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Parse worker panicked");
            }
        }
    }
}

impl ParseDispatch for ParseWorker {
    fn dispatch(&self, job: ParseJob) -> Result<(), DispatchError> {
        match &self.jobs {
            Some(jobs) => jobs.dispatch(job),
            None => Err(DispatchError::WorkerGone),
        }
    }
}

fn worker_loop(jobs: Receiver<ParseJob>, outcomes: Sender<ParseOutcome>) {
    log::info!("Parse worker started");

    while let Ok(mut job) = jobs.recv() {
        while let Ok(newer) = jobs.try_recv() {
            log::debug!("Parse worker: skipping superseded {}", job.id);
            job = newer;
        }

        let result = parse_unified_diff(&job.diff_text, &job.options.parse_options());
        match &result {
            Ok(diff) => log::debug!("Parse worker: {} produced {} file(s)", job.id, diff.len()),
            Err(e) => log::warn!("Parse worker: {} failed: {}", job.id, e),
        }

        if outcomes
            .send(ParseOutcome {
                job_id: job.id,
                result,
            })
            .is_err()
        {
            log::error!("Outcome channel disconnected, shutting down");
            break;
        }
    }

    log::info!("Parse worker stopped");
}
