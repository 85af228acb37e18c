//! Source comments grouped by source root.
//!
//! Comments are kept verbatim (delimiters included) for reading alongside the
//! graphs. License headers are noise for that purpose: any comment mentioning
//! `Copyright` is dropped.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::types::CompilationUnit;

/// Comments containing this text are not collected.
const LICENSE_MARKER: &str = "Copyright";

/// Suffix of the per-root comment files.
const FILE_SUFFIX: &str = "_comments.txt";

/// Comments of every scanned source root, in scan order within a root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceComments {
    by_root: BTreeMap<String, Vec<String>>,
}

impl SourceComments {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one comment found under `root`.
    ///
    /// Returns `false` if the comment is a license header and was dropped.
    pub fn add(&mut self, root: &str, comment: &str) -> bool {
        if comment.contains(LICENSE_MARKER) {
            return false;
        }
        self.by_root
            .entry(root.to_string())
            .or_default()
            .push(comment.to_string());
        true
    }

    /// Add every comment of a compilation unit.
    pub fn add_unit(&mut self, root: &str, unit: &CompilationUnit) {
        for comment in &unit.comments {
            self.add(root, comment);
        }
    }

    /// Roots with at least one comment, sorted.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.by_root.keys().map(String::as_str)
    }

    /// Comments collected under `root`.
    #[must_use]
    pub fn comments_of(&self, root: &str) -> &[String] {
        self.by_root.get(root).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of collected comments.
    #[must_use]
    pub fn count(&self) -> usize {
        self.by_root.values().map(Vec::len).sum()
    }

    /// One line per comment, prefixed with its root.
    #[must_use]
    pub fn render_root(&self, root: &str) -> String {
        let mut out = String::new();
        for comment in self.comments_of(root) {
            let _ = writeln!(out, "{root} has the following comment: {comment}");
        }
        out
    }

    /// Every root rendered in turn.
    #[must_use]
    pub fn render(&self) -> String {
        self.roots().map(|root| self.render_root(root)).collect()
    }

    /// Write one `<root>_comments.txt` file per root into `out_dir`.
    ///
    /// Returns the written paths, sorted by root.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if `out_dir` cannot be created or a file cannot be
    /// written.
    pub fn write_files(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(out_dir)?;
        let mut written = Vec::new();
        for root in self.roots() {
            let path = out_dir.join(comment_file_name(root));
            std::fs::write(&path, self.render_root(root))?;
            debug!(
                root,
                file = %path.display(),
                comments = self.comments_of(root).len(),
                "Wrote comments"
            );
            written.push(path);
        }
        Ok(written)
    }
}

/// File name for the comments of a root: path separators become `_`, and the
/// repository root itself is `root`.
#[must_use]
pub fn comment_file_name(root: &str) -> String {
    let stem: String = root
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let stem = stem.trim_matches('_');
    if stem.is_empty() || stem == "." {
        format!("root{FILE_SUFFIX}")
    } else {
        format!("{stem}{FILE_SUFFIX}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn license_headers_are_dropped() {
        let mut comments = SourceComments::new();

        assert!(!comments.add("sdk/src", "/* Copyright (c) 2020 Acme */"));
        assert!(comments.add("sdk/src", "// parses the header"));

        assert_eq!(comments.count(), 1);
        assert_eq!(comments.comments_of("sdk/src"), ["// parses the header"]);
    }

    #[test]
    fn comments_are_grouped_by_root() {
        let mut comments = SourceComments::new();
        comments.add("tools/src", "// b");
        comments.add("sdk/src", "// a");
        comments.add("tools/src", "// c");

        assert_eq!(comments.roots().collect::<Vec<_>>(), vec!["sdk/src", "tools/src"]);
        assert_eq!(comments.comments_of("tools/src"), ["// b", "// c"]);
        assert!(comments.comments_of("absent").is_empty());
        assert_eq!(
            comments.render(),
            "sdk/src has the following comment: // a\n\
             tools/src has the following comment: // b\n\
             tools/src has the following comment: // c\n"
        );
    }

    #[rstest]
    #[case::nested("sdk/src/main/java", "sdk_src_main_java_comments.txt")]
    #[case::single("src", "src_comments.txt")]
    #[case::repo_root(".", "root_comments.txt")]
    fn file_names_flatten_the_root_path(#[case] root: &str, #[case] expected: &str) {
        assert_eq!(comment_file_name(root), expected);
    }

    #[test]
    fn writes_one_file_per_root() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let mut comments = SourceComments::new();
        comments.add("sdk/src", "// a");
        comments.add("tools/src", "/** b */");

        let written = comments
            .write_files(&dir.path().join("out"))
            .expect("write should succeed");

        assert_eq!(
            written,
            vec![
                dir.path().join("out/sdk_src_comments.txt"),
                dir.path().join("out/tools_src_comments.txt"),
            ]
        );
        let text = std::fs::read_to_string(&written[1]).expect("read");
        assert_eq!(text, "tools/src has the following comment: /** b */\n");
    }
}
