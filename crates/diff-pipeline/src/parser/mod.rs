//! Unified diff parsing.

mod unified;
mod zip;

pub use unified::{parse_unified_diff, NearbySequences, ParseError, ParseOptions};
