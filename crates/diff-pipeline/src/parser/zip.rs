//! Interleaving of adjacent deletion/addition runs.

use crate::model::{DiffLine, LineKind};

/// Pair each run of deletions with the run of additions that directly
/// follows it: `-a -b +x +y` becomes `-a +x -b +y`.
///
/// Unpaired lines of the longer run keep their original order at the end.
pub(crate) fn zip_changes(lines: Vec<DiffLine>) -> Vec<DiffLine> {
    let mut result = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        if line.kind != LineKind::Deletion {
            result.push(line);
            continue;
        }

        let mut deletions = vec![line];
        while let Some(next) = iter.next_if(|l| l.kind == LineKind::Deletion) {
            deletions.push(next);
        }
        let mut additions = Vec::new();
        while let Some(next) = iter.next_if(|l| l.kind == LineKind::Addition) {
            additions.push(next);
        }

        let mut deletions = deletions.into_iter();
        let mut additions = additions.into_iter();
        loop {
            match (deletions.next(), additions.next()) {
                (None, None) => break,
                (deletion, addition) => {
                    result.extend(deletion);
                    result.extend(addition);
                }
            }
        }
    }

    result
}
