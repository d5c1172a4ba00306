//! Parse unified diff format (as produced by `git diff` or the synthesizer).

use super::zip::zip_changes;
use crate::hash::short_hash;
use crate::model::{DiffLine, FileDiff, FileStatus, Hunk, LineKind, ParsedDiff};
use thiserror::Error;
use unidiff::{Hunk as UnidiffHunk, Line as UnidiffLine, PatchSet, PatchedFile};

/// Errors that can occur during diff parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Failed to parse diff: {0}")]
    ParseFailed(String),
}

/// How nearby change sequences inside a hunk are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbySequences {
    /// Interleave each deletion run with the addition run that follows it.
    Zip,
}

/// Options accepted by [`parse_unified_diff`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub nearby_sequences: Option<NearbySequences>,
}

/// Git extended header data for one `diff --git` section.
#[derive(Debug, Default)]
struct SectionHeader {
    paths: Option<(String, String)>,
    revisions: Option<(String, String)>,
    new_file: bool,
    deleted_file: bool,
    renamed: bool,
}

/// Parse a unified diff string into a [`ParsedDiff`].
///
/// A `diff --git` section without `---`/`+++` lines (binary files, mode-only
/// changes, a synthesized diff of two identical texts) yields a file with no
/// hunks. Text with neither yields an empty sequence.
///
/// # Example
/// ```ignore
/// let diff = parse_unified_diff(diff_text, &ParseOptions::default())?;
/// println!("Changed files: {}", diff.files.len());
/// ```
pub fn parse_unified_diff(
    diff_text: &str,
    options: &ParseOptions,
) -> Result<ParsedDiff, ParseError> {
    let mut files = Vec::new();

    for section in split_sections(diff_text) {
        let header = parse_section_header(section);

        let mut patch_set = PatchSet::new();
        patch_set
            .parse(section)
            .map_err(|e| ParseError::ParseFailed(e.to_string()))?;

        let patched_files = patch_set.files();
        if patched_files.is_empty() {
            if let Some(file) = header_only_file(&header, files.len()) {
                files.push(file);
            }
            continue;
        }

        let single = patched_files.len() == 1;
        for patched_file in patched_files {
            let position = files.len();
            let revisions = header.revisions.clone().filter(|_| single);
            files.push(parse_patched_file(
                patched_file,
                &header,
                revisions,
                position,
                options,
            ));
        }
    }

    log::debug!("Parsed {} file(s) from diff text", files.len());
    Ok(ParsedDiff::from_files(files))
}

/// Split the text at every `diff --git` line. Anything before the first one
/// (plain `diff -u` output) forms its own section.
fn split_sections(diff_text: &str) -> Vec<&str> {
    let mut starts = vec![0];
    let mut offset = 0;
    for line in diff_text.split_inclusive('\n') {
        if offset > 0 && line.starts_with("diff --git ") {
            starts.push(offset);
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(diff_text.len());
            &diff_text[start..end]
        })
        .filter(|section| !section.trim().is_empty())
        .collect()
}

fn parse_section_header(section: &str) -> SectionHeader {
    let mut header = SectionHeader::default();

    for line in section.lines() {
        if line.starts_with("--- ") || line.starts_with("@@") {
            break;
        }
        if let Some(rest) = line.strip_prefix("diff --git ") {
            header.paths = parse_git_paths(rest);
        } else if let Some(rest) = line.strip_prefix("index ") {
            header.revisions = parse_index_line(rest);
        } else if line.starts_with("new file mode") {
            header.new_file = true;
        } else if line.starts_with("deleted file mode") {
            header.deleted_file = true;
        } else if let Some(path) = line.strip_prefix("rename from ") {
            header.renamed = true;
            if let Some((old, _)) = header.paths.as_mut() {
                *old = path.to_string();
            }
        } else if let Some(path) = line.strip_prefix("rename to ") {
            header.renamed = true;
            if let Some((_, new)) = header.paths.as_mut() {
                *new = path.to_string();
            }
        }
    }

    header
}

/// Parse `a/old/path b/new/path` from a `diff --git` line.
fn parse_git_paths(rest: &str) -> Option<(String, String)> {
    let (old, new) = rest.split_once(" b/")?;
    let old = old.strip_prefix("a/").unwrap_or(old);
    Some((old.to_string(), new.trim_end().to_string()))
}

/// A file record for a `diff --git` section that carries no hunks.
fn header_only_file(header: &SectionHeader, position: usize) -> Option<FileDiff> {
    let (old_path, new_path) = header.paths.clone()?;
    let (old_revision, new_revision) = header.revisions.clone().unwrap_or_else(|| {
        (
            short_hash(&format!("{}:old:{}", position, old_path), 7),
            short_hash(&format!("{}:new:{}", position, new_path), 7),
        )
    });

    let mut file = FileDiff::new(old_revision, new_revision, old_path, new_path);
    file.status = if header.new_file {
        FileStatus::Added
    } else if header.deleted_file {
        FileStatus::Deleted
    } else if header.renamed {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    };
    Some(file)
}

/// Parse `abc123..def456 100644` into its two blob ids.
fn parse_index_line(rest: &str) -> Option<(String, String)> {
    let range = rest.split_whitespace().next()?;
    let (old, new) = range.split_once("..")?;
    if old.is_empty() || new.is_empty() {
        return None;
    }
    Some((old.to_string(), new.to_string()))
}

fn parse_patched_file(
    file: &PatchedFile,
    header: &SectionHeader,
    revisions: Option<(String, String)>,
    position: usize,
    options: &ParseOptions,
) -> FileDiff {
    let source = clean_path(&file.source_file);
    let target = clean_path(&file.target_file);

    let (old_revision, new_revision) = revisions.unwrap_or_else(|| {
        (
            short_hash(&format!("{}:old:{}", position, source), 7),
            short_hash(&format!("{}:new:{}", position, target), 7),
        )
    });

    let mut file_diff = FileDiff::new(old_revision, new_revision, &source, &target);
    file_diff.status = determine_status(&source, &target, header);

    for hunk in file.hunks() {
        file_diff.hunks.push(parse_hunk(hunk, options));
    }

    file_diff.recalculate_stats();
    file_diff
}

fn parse_hunk(hunk: &UnidiffHunk, options: &ParseOptions) -> Hunk {
    let (old_start, old_count) = (hunk.source_start as u32, hunk.source_length as u32);
    let (new_start, new_count) = (hunk.target_start as u32, hunk.target_length as u32);

    // Keep the function context git prints after the range, if any
    let mut parsed = if hunk.section_header.is_empty() {
        Hunk::new(old_start, old_count, new_start, new_count)
    } else {
        Hunk::with_context(
            old_start,
            old_count,
            new_start,
            new_count,
            &hunk.section_header,
        )
    };

    let lines: Vec<DiffLine> = hunk.lines().iter().filter_map(parse_line).collect();
    parsed.lines = match options.nearby_sequences {
        Some(NearbySequences::Zip) => zip_changes(lines),
        None => lines,
    };

    parsed
}

fn parse_line(line: &UnidiffLine) -> Option<DiffLine> {
    let kind = match line.line_type.as_str() {
        "+" => LineKind::Addition,
        "-" => LineKind::Deletion,
        " " => LineKind::Context,
        // "\ No newline at end of file" carries no content
        _ => return None,
    };

    Some(DiffLine {
        kind,
        content: line.value.to_string(),
        old_line: line.source_line_no.map(|n| n as u32),
        new_line: line.target_line_no.map(|n| n as u32),
    })
}

fn determine_status(source: &str, target: &str, header: &SectionHeader) -> FileStatus {
    if header.new_file || source == "/dev/null" || source.is_empty() {
        FileStatus::Added
    } else if header.deleted_file || target == "/dev/null" || target.is_empty() {
        FileStatus::Deleted
    } else if header.renamed {
        FileStatus::Renamed
    } else {
        FileStatus::Modified
    }
}

/// Clean the path by removing a/b prefixes from git diff output.
fn clean_path(path: &str) -> String {
    let path = path.trim();

    if let Some(stripped) = path.strip_prefix("a/") {
        return stripped.to_string();
    }
    if let Some(stripped) = path.strip_prefix("b/") {
        return stripped.to_string();
    }

    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE_DIFF: &str = r#"diff --git a/src/main.rs b/src/main.rs
index abc123..def456 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,3 +1,4 @@ fn main()
 fn main() {
     println!("Hello");
+    println!("World");
 }
diff --git a/src/lib.rs b/src/lib.rs
index 111222..333444 100644
--- a/src/lib.rs
+++ b/src/lib.rs
@@ -10,5 +10,4 @@ impl Foo {
 impl Foo {
     fn bar(&self) {
-        // old comment
         self.do_thing();
     }
"#;

    #[test]
    fn test_parse_simple_diff() {
        let diff = parse_unified_diff(SAMPLE_DIFF, &ParseOptions::default()).unwrap();

        assert_eq!(diff.files.len(), 2);
        assert_eq!(diff.total_additions, 1);
        assert_eq!(diff.total_deletions, 1);

        let file1 = &diff.files[0];
        assert_eq!(file1.new_path, "src/main.rs");
        assert_eq!(file1.status, FileStatus::Modified);
        assert_eq!(file1.old_revision, "abc123");
        assert_eq!(file1.new_revision, "def456");
        assert_eq!(file1.additions, 1);
        assert_eq!(file1.hunks.len(), 1);

        let hunk = &file1.hunks[0];
        assert_eq!(hunk.old_start, 1);
        assert_eq!(hunk.new_start, 1);
        assert!(hunk.header.contains("fn main()"));

        let file2 = &diff.files[1];
        assert_eq!(file2.new_path, "src/lib.rs");
        assert_eq!(file2.key(), "111222-333444");
        assert_eq!(file2.deletions, 1);
    }

    #[test]
    fn test_parse_new_file() {
        let diff = r#"diff --git a/new_file.rs b/new_file.rs
new file mode 100644
index 0000000..abc1234
--- /dev/null
+++ b/new_file.rs
@@ -0,0 +1,3 @@
+fn new_function() {
+    // new code
+}
"#;

        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].status, FileStatus::Added);
        assert_eq!(parsed.files[0].additions, 3);
        assert_eq!(parsed.files[0].old_revision, "0000000");
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff = r#"diff --git a/old_file.rs b/old_file.rs
deleted file mode 100644
index abc1234..0000000
--- a/old_file.rs
+++ /dev/null
@@ -1,3 +0,0 @@
-fn old_function() {
-    // old code
-}
"#;

        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.files.len(), 1);
        assert_eq!(parsed.files[0].status, FileStatus::Deleted);
        assert_eq!(parsed.files[0].deletions, 3);
        assert_eq!(parsed.files[0].display_name(), "old_file.rs");
    }

    #[test]
    fn test_parse_renamed_file() {
        let diff = r#"diff --git a/old_name.rs b/new_name.rs
similarity index 95%
rename from old_name.rs
rename to new_name.rs
index abc123..def456 100644
--- a/old_name.rs
+++ b/new_name.rs
@@ -1,3 +1,3 @@
 fn example() {
-    // old
+    // new
 }
"#;

        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.files.len(), 1);

        let file = &parsed.files[0];
        assert_eq!(file.new_path, "new_name.rs");
        assert_eq!(file.old_path, "old_name.rs");
        assert_eq!(file.status, FileStatus::Renamed);
    }

    #[test]
    fn test_header_without_hunks_yields_empty_file() {
        let diff = "diff --git a/a b/b\nindex 123456789..abcdef012 100644\n";
        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();

        assert_eq!(parsed.len(), 1);
        let file = &parsed.files[0];
        assert_eq!(file.key(), "123456789-abcdef012");
        assert_eq!(file.old_path, "a");
        assert_eq!(file.new_path, "b");
        assert!(file.hunks.is_empty());
        assert_eq!(parsed.total_additions + parsed.total_deletions, 0);
    }

    #[test]
    fn test_binary_and_mode_only_sections_are_kept() {
        let diff = "diff --git a/logo.png b/logo.png\n\
                    index 1111111..2222222 100644\n\
                    Binary files a/logo.png and b/logo.png differ\n\
                    diff --git a/run.sh b/run.sh\n\
                    old mode 100644\n\
                    new mode 100755\n\
                    diff --git a/src/lib.rs b/src/lib.rs\n\
                    index 3..4 100644\n\
                    --- a/src/lib.rs\n\
                    +++ b/src/lib.rs\n\
                    @@ -1,1 +1,1 @@\n\
                    -a\n\
                    +b\n";
        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();

        let paths: Vec<&str> = parsed.files.iter().map(|f| f.new_path.as_str()).collect();
        assert_eq!(paths, vec!["logo.png", "run.sh", "src/lib.rs"]);
        assert_eq!(parsed.files[0].key(), "1111111-2222222");
        assert!(parsed.files[1].hunks.is_empty());
        assert_eq!(parsed.files[1].status, FileStatus::Modified);
        assert_eq!(parsed.files[2].key(), "3-4");

        let mut keys: Vec<String> = parsed.files.iter().map(FileDiff::key).collect();
        keys.dedup();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_pure_rename_uses_rename_paths() {
        let diff = "diff --git a/old.rs b/new.rs\n\
                    similarity index 100%\n\
                    rename from old.rs\n\
                    rename to new.rs\n";
        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();

        assert_eq!(parsed.len(), 1);
        let file = &parsed.files[0];
        assert_eq!(file.status, FileStatus::Renamed);
        assert_eq!(file.old_path, "old.rs");
        assert_eq!(file.new_path, "new.rs");
    }

    #[test]
    fn test_parse_git_paths() {
        assert_eq!(
            parse_git_paths("a/src/x.rs b/src/y.rs"),
            Some(("src/x.rs".to_string(), "src/y.rs".to_string()))
        );
        assert_eq!(parse_git_paths("nonsense"), None);
    }

    #[test]
    fn test_plain_diff_gets_fallback_revisions() {
        let diff = "--- a\n+++ b\n@@ -1,2 +1,2 @@\n keep\n-old\n+new\n";
        let parsed = parse_unified_diff(diff, &ParseOptions::default()).unwrap();
        assert_eq!(parsed.files.len(), 1);

        let file = &parsed.files[0];
        assert_eq!(file.status, FileStatus::Modified);
        assert_eq!(file.old_revision.len(), 7);
        assert_ne!(file.old_revision, file.new_revision);
    }

    #[test]
    fn test_zip_option_interleaves_changes() {
        let diff = "--- a\n+++ b\n@@ -1,2 +1,2 @@\n-one\n-two\n+uno\n+dos\n";

        let plain = parse_unified_diff(diff, &ParseOptions::default()).unwrap();
        let zipped = parse_unified_diff(
            diff,
            &ParseOptions {
                nearby_sequences: Some(NearbySequences::Zip),
            },
        )
        .unwrap();

        let contents = |d: &ParsedDiff| -> Vec<String> {
            d.files[0].hunks[0]
                .lines
                .iter()
                .map(|l| l.content.clone())
                .collect()
        };
        assert_eq!(contents(&plain), vec!["one", "two", "uno", "dos"]);
        assert_eq!(contents(&zipped), vec!["one", "uno", "two", "dos"]);
    }

    #[test]
    fn test_split_sections() {
        let sections = split_sections(SAMPLE_DIFF);
        assert_eq!(sections.len(), 2);
        assert!(sections[0].starts_with("diff --git a/src/main.rs"));
        assert!(sections[1].starts_with("diff --git a/src/lib.rs"));
    }

    #[test]
    fn test_parse_index_line() {
        assert_eq!(
            parse_index_line("abc..def 100644"),
            Some(("abc".to_string(), "def".to_string()))
        );
        assert_eq!(parse_index_line("abc"), None);
    }

    #[test]
    fn test_clean_path() {
        assert_eq!(clean_path("a/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("b/src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("src/main.rs"), "src/main.rs");
        assert_eq!(clean_path("/dev/null"), "/dev/null");
    }

    #[test]
    fn test_line_numbers() {
        let diff = parse_unified_diff(SAMPLE_DIFF, &ParseOptions::default()).unwrap();
        let hunk = &diff.files[0].hunks[0];

        assert_eq!(hunk.lines[0].kind, LineKind::Context);
        assert_eq!(hunk.lines[0].old_line, Some(1));
        assert_eq!(hunk.lines[0].new_line, Some(1));

        let addition = hunk
            .lines
            .iter()
            .find(|l| l.kind == LineKind::Addition)
            .unwrap();
        assert!(addition.old_line.is_none());
        assert_eq!(addition.new_line, Some(3));
    }
}
