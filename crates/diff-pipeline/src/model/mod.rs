//! Data models for diff representation.

mod diff;

pub use diff::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, ParsedDiff};
