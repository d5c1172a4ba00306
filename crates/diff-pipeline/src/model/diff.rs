//! Diff data structures produced by the parser.

/// An ordered sequence of file diffs produced by one completed parse job.
///
/// A new `ParsedDiff` always replaces the previous one wholesale; there is no
/// merging across jobs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDiff {
    /// All files in the diff, in the order they appear in the text.
    pub files: Vec<FileDiff>,
    /// Total additions across all files.
    pub total_additions: usize,
    /// Total deletions across all files.
    pub total_deletions: usize,
}

impl ParsedDiff {
    /// Build a parsed diff from files, computing totals.
    pub fn from_files(files: Vec<FileDiff>) -> Self {
        let mut diff = Self {
            files,
            ..Self::default()
        };
        diff.recalculate_totals();
        diff
    }

    /// Number of files in the sequence.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the sequence holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Recalculate totals from files.
    pub fn recalculate_totals(&mut self) {
        self.total_additions = self.files.iter().map(|f| f.additions).sum();
        self.total_deletions = self.files.iter().map(|f| f.deletions).sum();
    }
}

/// A single file's diff.
///
/// Identified by the `(old_revision, new_revision)` pair taken from the
/// `index` header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// Blob id of the old side.
    pub old_revision: String,
    /// Blob id of the new side.
    pub new_revision: String,
    /// Path on the old side (`/dev/null` for added files).
    pub old_path: String,
    /// Path on the new side (`/dev/null` for deleted files).
    pub new_path: String,
    /// File status.
    pub status: FileStatus,
    /// Change hunks.
    pub hunks: Vec<Hunk>,
    /// Number of added lines.
    pub additions: usize,
    /// Number of deleted lines.
    pub deletions: usize,
}

impl FileDiff {
    /// Create a new, empty file diff.
    pub fn new(
        old_revision: impl Into<String>,
        new_revision: impl Into<String>,
        old_path: impl Into<String>,
        new_path: impl Into<String>,
    ) -> Self {
        Self {
            old_revision: old_revision.into(),
            new_revision: new_revision.into(),
            old_path: old_path.into(),
            new_path: new_path.into(),
            status: FileStatus::Modified,
            hunks: Vec::new(),
            additions: 0,
            deletions: 0,
        }
    }

    /// Stable key for this file, used by consumers to track rendered items.
    pub fn key(&self) -> String {
        format!("{}-{}", self.old_revision, self.new_revision)
    }

    /// The path to show for this file (handles renames and deletions).
    pub fn display_name(&self) -> String {
        match self.status {
            FileStatus::Deleted => self.old_path.clone(),
            FileStatus::Renamed => format!("{} → {}", self.old_path, self.new_path),
            _ => self.new_path.clone(),
        }
    }

    /// Recalculate line statistics from hunks.
    pub fn recalculate_stats(&mut self) {
        self.additions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Addition)
            .count();
        self.deletions = self
            .hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| l.kind == LineKind::Deletion)
            .count();
    }

    /// Largest line number on either side, for gutter width.
    pub fn max_line_no(&self) -> u32 {
        self.hunks
            .iter()
            .flat_map(|h| h.lines.iter())
            .filter_map(|l| l.new_line.max(l.old_line))
            .max()
            .unwrap_or(1)
    }
}

/// File status in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl FileStatus {
    /// Get a single-character representation.
    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
        }
    }
}

/// A contiguous region of changes (hunk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// Header line (e.g., "@@ -10,5 +10,7 @@ fn example()").
    pub header: String,
    /// Old file starting line.
    pub old_start: u32,
    /// Number of lines in old version.
    pub old_count: u32,
    /// New file starting line.
    pub new_start: u32,
    /// Number of lines in new version.
    pub new_count: u32,
    /// Lines in this hunk.
    pub lines: Vec<DiffLine>,
}

impl Hunk {
    /// Create a new hunk with the given header info.
    pub fn new(old_start: u32, old_count: u32, new_start: u32, new_count: u32) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@",
                old_start, old_count, new_start, new_count
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }

    /// Create a hunk with a function context in header.
    pub fn with_context(
        old_start: u32,
        old_count: u32,
        new_start: u32,
        new_count: u32,
        context: &str,
    ) -> Self {
        Self {
            header: format!(
                "@@ -{},{} +{},{} @@ {}",
                old_start, old_count, new_start, new_count, context
            ),
            old_start,
            old_count,
            new_start,
            new_count,
            lines: Vec::new(),
        }
    }
}

/// A single line in the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    /// Line type.
    pub kind: LineKind,
    /// Line content (without leading +/-/ ).
    pub content: String,
    /// Line number in old file (for Context and Deletion).
    pub old_line: Option<u32>,
    /// Line number in new file (for Context and Addition).
    pub new_line: Option<u32>,
}

impl DiffLine {
    /// Create a new context line.
    pub fn context(content: impl Into<String>, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: LineKind::Context,
            content: content.into(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    /// Create a new addition line.
    pub fn addition(content: impl Into<String>, new_line: u32) -> Self {
        Self {
            kind: LineKind::Addition,
            content: content.into(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    /// Create a new deletion line.
    pub fn deletion(content: impl Into<String>, old_line: u32) -> Self {
        Self {
            kind: LineKind::Deletion,
            content: content.into(),
            old_line: Some(old_line),
            new_line: None,
        }
    }
}

/// Line type in the diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line (for context).
    Context,
    /// Added line (+).
    Addition,
    /// Removed line (-).
    Deletion,
}

impl LineKind {
    /// Get the prefix character for this line type.
    pub fn prefix(&self) -> char {
        match self {
            LineKind::Context => ' ',
            LineKind::Addition => '+',
            LineKind::Deletion => '-',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_diff_display_name() {
        let mut file = FileDiff::new("abc", "def", "src/old.rs", "src/new.rs");
        assert_eq!(file.display_name(), "src/new.rs");

        file.status = FileStatus::Renamed;
        assert_eq!(file.display_name(), "src/old.rs → src/new.rs");

        file.status = FileStatus::Deleted;
        assert_eq!(file.display_name(), "src/old.rs");
    }

    #[test]
    fn test_file_key_uses_revisions() {
        let file = FileDiff::new("1111111", "2222222", "a", "b");
        assert_eq!(file.key(), "1111111-2222222");
    }

    #[test]
    fn test_hunk_header_format() {
        let hunk = Hunk::new(10, 5, 10, 7);
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@");

        let hunk = Hunk::with_context(10, 5, 10, 7, "fn example()");
        assert_eq!(hunk.header, "@@ -10,5 +10,7 @@ fn example()");
    }

    #[test]
    fn test_stats_and_totals() {
        let mut file = FileDiff::new("a", "b", "f", "f");
        let mut hunk = Hunk::new(1, 2, 1, 2);
        hunk.lines.push(DiffLine::context("keep", 1, 1));
        hunk.lines.push(DiffLine::deletion("old", 2));
        hunk.lines.push(DiffLine::addition("new", 2));
        file.hunks.push(hunk);
        file.recalculate_stats();

        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);
        assert_eq!(file.max_line_no(), 2);

        let diff = ParsedDiff::from_files(vec![file.clone(), file]);
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.total_additions, 2);
        assert_eq!(diff.total_deletions, 2);
    }
}
