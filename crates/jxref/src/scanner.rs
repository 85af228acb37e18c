//! The boundary between parsing and resolution.
//!
//! A `CorpusScanner` turns the files of one source root into compilation units.
//! The resolution engine only ever sees `CompilationUnit`s, so a scanner backed
//! by a full type solver could replace the tree-sitter one without touching it.

use tracing::warn;

use crate::discovery::SourceRoot;
use crate::error::ScanError;
use crate::languages::{get_language_support, LanguageSupport};
use crate::parallel::parse_files;
use crate::types::{CompilationUnit, Language};

/// Units scanned from one source root plus the files that could not be scanned.
#[derive(Debug, Default)]
pub struct ScanBatch {
    /// Successfully scanned units, in file order
    pub units: Vec<CompilationUnit>,
    /// Files that were skipped
    pub errors: Vec<ScanError>,
}

impl ScanBatch {
    /// Split per-file results into units and errors.
    #[must_use]
    pub fn from_results(results: Vec<Result<CompilationUnit, ScanError>>) -> Self {
        let mut batch = Self::default();
        for result in results {
            match result {
                Ok(unit) => batch.units.push(unit),
                Err(error) => batch.errors.push(error),
            }
        }
        batch
    }
}

/// Produces compilation units for the resolution engine.
pub trait CorpusScanner: Send + Sync {
    /// Scan every file of a source root. Never fails as a whole.
    fn scan(&self, root: &SourceRoot) -> ScanBatch;
}

/// Tree-sitter based scanner for Java sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScanner;

impl CorpusScanner for JavaScanner {
    fn scan(&self, root: &SourceRoot) -> ScanBatch {
        let support: &dyn LanguageSupport = get_language_support(Language::Java);
        let batch = ScanBatch::from_results(parse_files(&root.files, support));

        for error in &batch.errors {
            warn!(
                file = %error.path.display(),
                kind = %error.kind,
                error = %error.message,
                "Skipping file"
            );
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_separates_units_from_failures() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let good = dir.path().join("Good.java");
        let bad = dir.path().join("Bad.java");
        fs::write(&good, "package p; class Good { }").expect("write");
        fs::write(&bad, "package p; class Bad {").expect("write");

        let root = SourceRoot {
            path: dir.path().to_path_buf(),
            files: vec![good, bad.clone()],
        };
        let batch = JavaScanner.scan(&root);

        assert_eq!(batch.units.len(), 1);
        assert_eq!(batch.units[0].types[0].qualified_name, "p.Good");
        assert_eq!(batch.errors.len(), 1);
        assert_eq!(batch.errors[0].path, bad);
    }

    #[test]
    fn empty_root_yields_empty_batch() {
        let root = SourceRoot {
            path: "src".into(),
            files: vec![],
        };

        let batch = JavaScanner.scan(&root);

        assert!(batch.units.is_empty());
        assert!(batch.errors.is_empty());
    }
}
