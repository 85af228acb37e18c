//! Error types for jxref operations.
//!
//! Errors are categorized into two main types:
//!
//! - **`Error`**: Top-level errors that halt a run (I/O on the repository root,
//!   unreadable configuration, a corpus with nothing to analyze)
//! - **`ScanError`**: File-level errors that are collected but don't halt scanning
//!
//! ## Error Philosophy
//!
//! Dependency graphs are best-effort by nature:
//! - A single malformed compilation unit shouldn't prevent scanning the rest
//! - Unresolved references are routine and never surface as errors
//! - Only infrastructure failures cause early termination
//!
//! ## Error Categorization
//!
//! `ScanErrorKind` uses a 4xx/5xx style categorization:
//! - Input problems (the corpus's fault): parse errors, bad encodings, broken manifests
//! - Internal problems (our fault): I/O errors

use std::path::PathBuf;
use thiserror::Error;

/// Result type for jxref operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for jxref operations.
///
/// These errors represent failures that prevent the run from producing
/// any usable graph.
#[derive(Debug, Error)]
pub enum Error {
    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be read or parsed
    #[error("configuration error in {path}: {source}")]
    Config {
        /// Path of the offending configuration file
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// Graph serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Scanning the corpus produced no compilation units at all
    #[error("no compilation units found under {0}")]
    EmptyCorpus(PathBuf),
}

/// Error encountered while scanning a specific file.
///
/// These errors are collected during scanning but don't halt the run.
/// The scanner continues with remaining files and reports all errors at the end.
#[derive(Debug, Clone)]
pub struct ScanError {
    /// Path to the file that failed
    pub path: PathBuf,
    /// Category of the error
    pub kind: ScanErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.path.display(),
            self.message,
            self.kind
        )
    }
}

impl std::error::Error for ScanError {}

/// Categorization of scanning errors.
///
/// Uses a 4xx/5xx style pattern:
/// - Input problems are issues with the corpus (the user can fix)
/// - Internal problems are issues reading it (environment or jxref)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    // === Input Problems (analogous to HTTP 4xx) ===
    /// Source file has syntax errors that prevent parsing
    ParseFailed,

    /// File content is not valid UTF-8
    EncodingError,

    /// Build manifest does not declare a project name
    ManifestInvalid,

    // === Internal Problems (analogous to HTTP 5xx) ===
    /// Could not read the file from disk
    IoError,
}

impl std::fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseFailed => write!(f, "parse failed"),
            Self::EncodingError => write!(f, "encoding error"),
            Self::ManifestInvalid => write!(f, "invalid manifest"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl ScanErrorKind {
    /// Returns `true` if this is an input problem (4xx-style).
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::ParseFailed | Self::EncodingError | Self::ManifestInvalid
        )
    }

    /// Returns `true` if this is an internal problem (5xx-style).
    #[must_use]
    pub fn is_internal_error(&self) -> bool {
        matches!(self, Self::IoError)
    }
}

impl ScanError {
    /// Create a new scanning error.
    #[must_use]
    pub fn new(path: PathBuf, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }

    /// Create a parse error for a file.
    #[must_use]
    pub fn parse_failed(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(path, ScanErrorKind::ParseFailed, message)
    }

    /// Create an encoding error for a file.
    #[must_use]
    pub fn encoding_error(path: PathBuf) -> Self {
        Self::new(path, ScanErrorKind::EncodingError, "file is not valid UTF-8")
    }

    /// Create a manifest error for a build file without a project name.
    #[must_use]
    pub fn manifest_invalid(path: PathBuf, message: impl Into<String>) -> Self {
        Self::new(path, ScanErrorKind::ManifestInvalid, message)
    }

    /// Create an I/O error for a file.
    #[must_use]
    pub fn io_error(path: PathBuf, error: &std::io::Error) -> Self {
        Self::new(path, ScanErrorKind::IoError, error.to_string())
    }
}
