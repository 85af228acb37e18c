//! Parallel file parsing.
//!
//! Parsing is the expensive part of a scan and has no shared state, so it runs
//! on the rayon pool. Recording the resulting units into a `SourceAnalysis`
//! stays sequential on the calling thread.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Jxref::analyze_sources                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Phase 1a (Parallel):    rayon::par_iter() file parsing     │
//! │  Phase 1b (Sequential):  SourceAnalysis::add_unit            │
//! │  Phase 2  (Sequential):  SourceAnalysis::finish              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::ScanError;
use crate::languages::tree_sitter_utils::first_error_position;
use crate::languages::LanguageSupport;
use crate::types::CompilationUnit;

/// Parse `paths` in parallel. Results come back in input order.
pub fn parse_files(
    paths: &[PathBuf],
    support: &dyn LanguageSupport,
) -> Vec<Result<CompilationUnit, ScanError>> {
    debug!(files = paths.len(), "Parsing files in parallel");

    paths
        .par_iter()
        .map_init(
            || {
                let mut parser = tree_sitter::Parser::new();
                let ready = parser.set_language(&support.tree_sitter_language());
                (parser, ready.map_err(|e| e.to_string()))
            },
            |(parser, ready), path| match ready {
                Ok(()) => parse_file(parser, support, path),
                Err(message) => Err(ScanError::parse_failed(
                    path.clone(),
                    format!("parser setup failed: {message}"),
                )),
            },
        )
        .collect()
}

/// Read and parse one file with an already configured parser.
pub fn parse_file(
    parser: &mut tree_sitter::Parser,
    support: &dyn LanguageSupport,
    path: &Path,
) -> Result<CompilationUnit, ScanError> {
    let bytes = std::fs::read(path).map_err(|e| ScanError::io_error(path.to_path_buf(), &e))?;
    let content =
        String::from_utf8(bytes).map_err(|_| ScanError::encoding_error(path.to_path_buf()))?;

    let tree = parser.parse(&content, None).ok_or_else(|| {
        ScanError::parse_failed(path.to_path_buf(), "tree-sitter returned no tree")
    })?;

    if let Some((line, column)) = first_error_position(&tree) {
        return Err(ScanError::parse_failed(
            path.to_path_buf(),
            format!("syntax error at line {line}, column {column}"),
        ));
    }

    let unit = support.extract_unit(path, &tree, content.as_bytes());
    trace!(
        file = %path.display(),
        types = unit.types.len(),
        usages = unit.usage_count(),
        "Parsed file"
    );
    Ok(unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanErrorKind;
    use crate::languages::java::JavaLanguage;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).expect("failed to write test file");
        path
    }

    #[test]
    fn parses_files_in_input_order() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let a = write(&dir, "A.java", b"package p; class A { }");
        let b = write(&dir, "B.java", b"package q; class B { }");

        let results = parse_files(&[a, b], &JavaLanguage);

        let packages: Vec<_> = results
            .into_iter()
            .map(|r| r.expect("parse should succeed").package)
            .collect();
        assert_eq!(packages, vec![Some("p".to_string()), Some("q".to_string())]);
    }

    #[test]
    fn syntax_errors_are_parse_failures() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = write(&dir, "Broken.java", b"package p;\nclass Broken { void f( }\n");

        let results = parse_files(&[path], &JavaLanguage);

        let err = results[0].as_ref().expect_err("broken file should fail");
        assert_eq!(err.kind, ScanErrorKind::ParseFailed);
        assert!(err.kind.is_input_error());
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = write(&dir, "Latin.java", b"package p; class A { String s = \"\xe9\"; }");

        let results = parse_files(&[path], &JavaLanguage);

        let err = results[0].as_ref().expect_err("non-UTF-8 file should fail");
        assert_eq!(err.kind, ScanErrorKind::EncodingError);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().expect("failed to create temp dir");

        let results = parse_files(&[dir.path().join("Gone.java")], &JavaLanguage);

        let err = results[0].as_ref().expect_err("missing file should fail");
        assert_eq!(err.kind, ScanErrorKind::IoError);
    }
}
