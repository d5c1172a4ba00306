//! Incremental disclosure of an already parsed file sequence.
//!
//! Parsing pays for the whole diff up front; rendering is paid one file at a
//! time as the consumer asks for more. The window only ever grows until the
//! next sequence replaces it.

/// How many leading files of the current sequence are exposed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct DisclosureWindow {
    count: usize,
}

impl DisclosureWindow {
    /// Window for a freshly installed sequence of `len` files: one file, or
    /// none when the sequence is empty.
    pub fn reset(len: usize) -> Self {
        Self { count: len.min(1) }
    }

    /// One more file, capped at `len`.
    #[must_use]
    pub fn advance(self, len: usize) -> Self {
        Self {
            count: (self.count + 1).min(len),
        }
    }

    /// Whether files beyond the window remain.
    pub fn has_more(self, len: usize) -> bool {
        self.count < len
    }

    pub fn count(self) -> usize {
        self.count
    }
}
