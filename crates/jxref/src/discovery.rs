//! Source-root discovery.
//!
//! Java sources live under a root from which directories mirror packages:
//! `src/main/java/org/acme/Main.java` declaring `package org.acme;` has the root
//! `src/main/java`. Discovery walks a project directory, reads each file's
//! package declaration and groups files by the root it implies. Roots that look
//! like test or benchmark trees are skipped.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::types::Language;

static PACKAGE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:@[\w.]+(?:\([^)]*\))?\s+)*package\s+([\w$]+(?:\s*\.\s*[\w$]+)*)\s*;")
        .expect("package declaration pattern is valid")
});

/// A directory from which package paths start, with the source files under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoot {
    /// The root directory
    pub path: PathBuf,
    /// Source files whose package maps onto this root, sorted
    pub files: Vec<PathBuf>,
}

/// Result of discovering the source roots of one project directory.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Roots to scan, sorted by path
    pub roots: Vec<SourceRoot>,
    /// Roots skipped because they match a skip marker
    pub skipped_roots: Vec<PathBuf>,
    /// Directories that could not be read, with the reason
    pub directories_skipped: Vec<(PathBuf, String)>,
}

/// Find the source roots under `project_dir`.
///
/// # Errors
///
/// Only fails for I/O errors on `project_dir` itself; unreadable
/// subdirectories are recorded in `directories_skipped`.
pub fn discover_source_roots(project_dir: &Path, config: &Config) -> Result<Discovery> {
    // Surface a missing project directory instead of an empty discovery.
    std::fs::metadata(project_dir)?;

    let mut files = Vec::new();
    let mut discovery = Discovery::default();
    walk_dir(project_dir, config, &mut files, &mut discovery.directories_skipped);
    files.sort();

    let mut by_root: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let root = match read_package(&file) {
            Some(package) => source_root_of(&file, &package),
            None => parent_dir(&file),
        };
        by_root.entry(root).or_default().push(file);
    }

    for (path, files) in by_root {
        let relative = path.strip_prefix(project_dir).unwrap_or(&path);
        if config.is_skipped_root(relative) {
            info!(root = %path.display(), files = files.len(), "Skipping test directory");
            discovery.skipped_roots.push(path);
            continue;
        }
        debug!(root = %path.display(), files = files.len(), "Found source root");
        discovery.roots.push(SourceRoot { path, files });
    }

    Ok(discovery)
}

/// Recursively collect source files, skipping excluded directories.
fn walk_dir(
    dir: &Path,
    config: &Config,
    files: &mut Vec<PathBuf>,
    directories_skipped: &mut Vec<(PathBuf, String)>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!(
                directory = %dir.display(),
                error = %e,
                "Cannot read directory, skipping"
            );
            directories_skipped.push((dir.to_path_buf(), e.to_string()));
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

        if path.is_dir() {
            let excluded = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| config.is_excluded_dir(name));
            if !excluded {
                walk_dir(&path, config, files, directories_skipped);
            }
        } else if path.is_file() && is_source_file(&path) {
            files.push(path);
        }
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
        .is_some()
}

/// Read the package declared by a source file, if any.
fn read_package(file: &Path) -> Option<String> {
    let bytes = match std::fs::read(file) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(file = %file.display(), error = %e, "Cannot read file for package lookup");
            return None;
        }
    };
    package_of(&String::from_utf8_lossy(&bytes))
}

/// The package named by the first package declaration in `source`.
#[must_use]
pub fn package_of(source: &str) -> Option<String> {
    let captures = PACKAGE_DECLARATION.captures(source)?;
    Some(
        captures[1]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect(),
    )
}

/// The directory `package`'s segments start from, falling back to the file's
/// directory when the layout does not mirror the package.
#[must_use]
pub fn source_root_of(file: &Path, package: &str) -> PathBuf {
    let parent = parent_dir(file);
    let mut dir = parent.as_path();
    for segment in package.rsplit('.') {
        if dir.file_name().and_then(|n| n.to_str()) != Some(segment) {
            return parent;
        }
        match dir.parent() {
            Some(up) => dir = up,
            None => return parent,
        }
    }
    dir.to_path_buf()
}

fn parent_dir(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}
