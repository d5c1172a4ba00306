//! Turn two text revisions into a git-style unified diff.

use crate::hash::short_hash;
use similar::TextDiff;
use uuid::Uuid;

/// Unchanged lines shown before and after each change.
pub const CONTEXT_LINES: usize = 3;

/// Length of the pseudo blob ids in the `index` line.
pub const BLOB_ID_LEN: usize = 9;

/// Build a unified diff between `old_text` and `new_text`.
///
/// The result starts with a synthetic git header naming both sides `a` and
/// `b`, with freshly generated blob ids, so it parses like a one-file
/// `git diff`. Identical inputs produce the header and no hunks, which
/// parses as one file without changes.
pub fn synthesize(old_text: &str, new_text: &str) -> String {
    let old_id = pseudo_blob_id();
    let new_id = pseudo_blob_id();
    synthesize_with_ids(old_text, new_text, &old_id, &new_id)
}

/// Same as [`synthesize`] with caller-chosen blob ids.
pub fn synthesize_with_ids(old_text: &str, new_text: &str, old_id: &str, new_id: &str) -> String {
    let header = format!("diff --git a/a b/b\nindex {}..{} 100644", old_id, new_id);
    format!("{}\n{}", header, format_hunks(old_text, new_text))
}

/// A stand-in blob id: the hash of a fresh unique token, cut to
/// [`BLOB_ID_LEN`] hex characters. Not derived from any content.
pub fn pseudo_blob_id() -> String {
    short_hash(&Uuid::new_v4().to_string(), BLOB_ID_LEN)
}

fn format_hunks(old_text: &str, new_text: &str) -> String {
    TextDiff::from_lines(old_text, new_text)
        .unified_diff()
        .context_radius(CONTEXT_LINES)
        .header("a", "b")
        .to_string()
}
