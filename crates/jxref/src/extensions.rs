//! File-extension statistics of a repository.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

/// How often each file extension occurs in a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionStats {
    counts: BTreeMap<String, usize>,
}

impl ExtensionStats {
    /// Count the extensions of every regular file under `root`.
    ///
    /// Hidden directories are not descended into. Files without an extension
    /// are ignored.
    #[must_use]
    pub fn collect(root: &Path) -> Self {
        let mut stats = Self::default();
        stats.walk(root);
        stats
    }

    fn walk(&mut self, dir: &Path) {
        let entries = match std::fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                warn!(directory = %dir.display(), error = %e, "Cannot read directory, skipping");
                return;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!(
                        directory = %dir.display(),
                        error = %e,
                        "Failed to read directory entry, skipping"
                    );
                    continue;
                }
            };
            let path = entry.path();
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if path.is_dir() {
                if !name.starts_with('.') {
                    self.walk(&path);
                }
            } else if path.is_file() {
                if let Some(extension) = extension_of(&name) {
                    self.add(extension);
                }
            }
        }
    }

    /// Count one file with the given extension.
    pub fn add(&mut self, extension: &str) {
        *self.counts.entry(extension.to_string()).or_default() += 1;
    }

    /// Occurrences of one extension.
    #[must_use]
    pub fn count(&self, extension: &str) -> usize {
        self.counts.get(extension).copied().unwrap_or(0)
    }

    /// Number of counted files.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Share of each extension in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn ratios(&self) -> BTreeMap<&str, f64> {
        let total = self.total() as f64;
        self.counts
            .iter()
            .map(|(ext, &count)| (ext.as_str(), count as f64 / total * 100.0))
            .collect()
    }

    /// The `n` most frequent extensions, most frequent first.
    #[must_use]
    pub fn top_by_count(&self, n: usize) -> Vec<(&str, usize)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(e, &c)| (e.as_str(), c)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries.truncate(n);
        entries
    }

    /// The `n` largest shares, largest first.
    #[must_use]
    pub fn top_by_ratio(&self, n: usize) -> Vec<(&str, f64)> {
        let mut entries: Vec<_> = self.ratios().into_iter().collect();
        entries.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        entries.truncate(n);
        entries
    }
}

/// Text after the last `.` of a file name; `None` when there is none or it is empty.
///
/// Dotfiles count under their name (`.gitignore` has the extension `gitignore`).
fn extension_of(file_name: &str) -> Option<&str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    if extension.is_empty() {
        None
    } else {
        Some(extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("Main.java", Some("java"))]
    #[case::double("archive.tar.gz", Some("gz"))]
    #[case::none("Makefile", None)]
    #[case::dotfile(".gitignore", Some("gitignore"))]
    #[case::trailing_dot("notes.", None)]
    fn extension_is_text_after_last_dot(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(extension_of(name), expected);
    }

    #[test]
    fn top_by_count_breaks_ties_by_extension() {
        let mut stats = ExtensionStats::default();
        for ext in ["py", "java", "java", "md", "c", "c"] {
            stats.add(ext);
        }

        assert_eq!(
            stats.top_by_count(3),
            vec![("c", 2), ("java", 2), ("md", 1)]
        );
    }

    #[test]
    fn ratios_are_percentages() {
        let mut stats = ExtensionStats::default();
        for ext in ["java", "java", "java", "py"] {
            stats.add(ext);
        }

        let ratios = stats.ratios();
        assert!((ratios["java"] - 75.0).abs() < 1e-9);
        assert!((ratios["py"] - 25.0).abs() < 1e-9);
        assert_eq!(stats.top_by_ratio(1)[0].0, "java");
    }

    #[test]
    fn empty_stats_have_no_ratios() {
        let stats = ExtensionStats::default();

        assert!(stats.ratios().is_empty());
        assert!(stats.top_by_count(10).is_empty());
    }

    proptest! {
        #[test]
        fn ratios_sum_to_one_hundred(exts in proptest::collection::vec("[a-e]", 1..50)) {
            let mut stats = ExtensionStats::default();
            for ext in &exts {
                stats.add(ext);
            }

            let sum: f64 = stats.ratios().values().sum();
            prop_assert!((sum - 100.0).abs() < 1e-6);
        }
    }
}
