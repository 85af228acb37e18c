//! Project dependencies declared in suite manifests.
//!
//! A suite manifest (`suite.py`) is a Python literal describing one project.
//! It is scanned line by line rather than evaluated:
//!
//! - the project name is the first `"name" : "<value>"` on any line
//! - the dependencies are the `"name"` values found from the line opening
//!   `"suites": [` up to and including the first line that contains `]`

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ScanError;

static NAME_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""name"\s*:\s*"([^"]*)""#).expect("manifest name pattern is valid")
});

const SUITES_SECTION: &str = r#""suites": ["#;

/// Name and declared dependencies of one manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestInfo {
    /// Path of the manifest file
    pub path: PathBuf,
    /// Project declared by the manifest
    pub project: String,
    /// Projects it depends on, in declaration order
    pub dependencies: Vec<String>,
}

/// The first `"name"` value in a manifest.
#[must_use]
pub fn project_name(text: &str) -> Option<String> {
    text.lines()
        .find_map(|line| NAME_ENTRY.captures(line))
        .map(|captures| captures[1].to_string())
}

/// The `"name"` values of the suites section.
#[must_use]
pub fn suite_dependencies(text: &str) -> Vec<String> {
    let mut dependencies = Vec::new();
    let mut in_suites = false;
    for line in text.lines() {
        if line.contains(SUITES_SECTION) {
            in_suites = true;
        }
        if !in_suites {
            continue;
        }
        if let Some(captures) = NAME_ENTRY.captures(line) {
            dependencies.push(captures[1].to_string());
        }
        if line.contains(']') {
            break;
        }
    }
    dependencies
}

/// Read one manifest.
///
/// # Errors
///
/// Returns a `ScanError` when the file cannot be read or names no project.
pub fn read_manifest(path: &Path) -> Result<ManifestInfo, ScanError> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => ScanError::encoding_error(path.to_path_buf()),
        _ => ScanError::io_error(path.to_path_buf(), &e),
    })?;

    let project = project_name(&text).ok_or_else(|| {
        ScanError::manifest_invalid(path.to_path_buf(), "no project name found in manifest")
    })?;
    let dependencies = suite_dependencies(&text);
    debug!(
        manifest = %path.display(),
        project = %project,
        dependencies = dependencies.len(),
        "Read manifest"
    );

    Ok(ManifestInfo {
        path: path.to_path_buf(),
        project,
        dependencies,
    })
}

/// Find every manifest under `repo_root`, sorted.
#[must_use]
pub fn discover_manifests(repo_root: &Path, config: &Config) -> Vec<PathBuf> {
    let mut manifests = Vec::new();
    collect_manifests(repo_root, config, &mut manifests);
    manifests.sort();
    manifests
}

fn collect_manifests(dir: &Path, config: &Config, manifests: &mut Vec<PathBuf>) {
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
            if !config.is_excluded_dir(&name) {
                collect_manifests(&path, config, manifests);
            }
        } else if name == config.manifest_file_name.as_str() {
            manifests.push(path);
        }
    }
}

/// Project → dependency edges collected from manifests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectDependencies {
    edges: BTreeMap<String, BTreeSet<String>>,
}

impl ProjectDependencies {
    /// Create an empty dependency set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `project` depends on `dependency`.
    pub fn add(&mut self, project: &str, dependency: &str) {
        self.edges
            .entry(project.to_string())
            .or_default()
            .insert(dependency.to_string());
    }

    /// Record every dependency of a manifest.
    pub fn add_manifest(&mut self, manifest: &ManifestInfo) {
        for dependency in &manifest.dependencies {
            self.add(&manifest.project, dependency);
        }
    }

    /// All edges as `(project, dependency)`, sorted.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().flat_map(|(project, deps)| {
            deps.iter().map(move |dep| (project.as_str(), dep.as_str()))
        })
    }

    /// Number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanErrorKind;
    use tempfile::TempDir;

    const SUITE: &str = r#"suite = {
  "mxversion": "6.0",
  "name" : "compiler",
  "imports" : {
    "suites": [
      {
        "name" : "truffle",
        "subdir": True,
      },
      {
        "name" : "regex",
        "subdir": True,
        "urls" : [
          {"url" : "https://example.invalid", "kind" : "binary"},
        ]
      },
      {
        "name" : "never-reached",
      },
    ]
  },
}
"#;

    #[test]
    fn project_name_is_first_name_entry() {
        assert_eq!(project_name(SUITE).as_deref(), Some("compiler"));
        assert_eq!(project_name("suite = {}"), None);
    }

    #[test]
    fn dependencies_stop_at_first_closing_bracket() {
        // The `urls` list closes on its own line and ends the section early.
        assert_eq!(suite_dependencies(SUITE), vec!["truffle", "regex"]);
    }

    #[test]
    fn closing_bracket_on_a_name_line_still_counts() {
        let text = "\"suites\": [\n  {\"name\" : \"sdk\"}]\n  {\"name\" : \"later\"}\n";

        assert_eq!(suite_dependencies(text), vec!["sdk"]);
    }

    #[test]
    fn no_suites_section_means_no_dependencies() {
        assert!(suite_dependencies("\"name\" : \"alone\"\n").is_empty());
    }

    #[test]
    fn read_manifest_rejects_files_without_name() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("suite.py");
        std::fs::write(&path, "suite = {}\n").expect("write");

        let err = read_manifest(&path).expect_err("nameless manifest should fail");

        assert_eq!(err.kind, ScanErrorKind::ManifestInvalid);
    }

    #[test]
    fn discovers_manifests_in_subdirectories() {
        let dir = TempDir::new().expect("failed to create temp dir");
        for sub in ["compiler/mx.compiler", "sdk/mx.sdk", ".git"] {
            std::fs::create_dir_all(dir.path().join(sub)).expect("mkdir");
            std::fs::write(dir.path().join(sub).join("suite.py"), "\"name\" : \"x\"\n")
                .expect("write");
        }

        let manifests = discover_manifests(dir.path(), &Config::default());

        assert_eq!(
            manifests,
            vec![
                dir.path().join("compiler/mx.compiler/suite.py"),
                dir.path().join("sdk/mx.sdk/suite.py"),
            ]
        );
    }

    #[test]
    fn dependency_edges_are_deduplicated_and_sorted() {
        let mut deps = ProjectDependencies::new();
        deps.add("compiler", "truffle");
        deps.add("compiler", "sdk");
        deps.add("compiler", "truffle");

        assert_eq!(deps.edge_count(), 2);
        assert_eq!(
            deps.edges().collect::<Vec<_>>(),
            vec![("compiler", "sdk"), ("compiler", "truffle")]
        );
    }
}
