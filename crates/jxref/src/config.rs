//! Run configuration.
//!
//! Configuration is optional. When no file is given on the command line,
//! `<repo>/.jxref.yaml` is used if it exists; otherwise every field takes its
//! default. A typical file for a multi-suite repository:
//!
//! ```yaml
//! projects: [compiler, sdk, tools]
//! excluded_namespaces: [java, javax, jdk]
//! skip_root_markers: [test, benchmark]
//! ```

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// File name looked up in the repository root when no explicit config is given.
pub const CONFIG_FILE_NAME: &str = ".jxref.yaml";

/// Settings for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Namespace roots whose classes and packages never appear as edge targets.
    pub excluded_namespaces: Vec<String>,
    /// Project directories (relative to the repository root) to scan for sources.
    /// Empty means the repository root is the only project.
    pub projects: Vec<PathBuf>,
    /// Source roots with a path word starting with any of these markers are
    /// skipped (`test` matches `src/test`, `org.acme.test` and `tests`).
    pub skip_root_markers: Vec<String>,
    /// Directory names never descended into while looking for sources.
    pub excluded_dirs: Vec<String>,
    /// File name of build manifests declaring a project and its dependencies.
    pub manifest_file_name: String,
    /// Number of entries shown by the extension report.
    pub top_extensions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            excluded_namespaces: vec!["java".to_string()],
            projects: Vec::new(),
            skip_root_markers: vec!["test".to_string(), "benchmark".to_string()],
            excluded_dirs: [
                "target",
                "node_modules",
                "vendor",
                "bin",
                "obj",
                "build",
                "dist",
                "out",
                "__pycache__",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            manifest_file_name: "suite.py".to_string(),
            top_extensions: 10,
        }
    }
}

impl Config {
    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed input or unknown fields.
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Config` if it
    /// is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&text).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `<repo_root>/.jxref.yaml` if present, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub fn discover(repo_root: &Path) -> Result<Self> {
        let candidate = repo_root.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!(repo = %repo_root.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Check if a directory should not be descended into.
    ///
    /// Hidden directories are always skipped.
    #[must_use]
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|d| d == name)
    }

    /// Check if a source root should be skipped (tests, benchmarks).
    ///
    /// Each path component is split into words at non-alphanumeric
    /// characters; a marker matches a word it starts, ignoring case. `latest`
    /// and `contest` do not match `test`.
    #[must_use]
    pub fn is_skipped_root(&self, root: &Path) -> bool {
        root.components()
            .filter_map(|component| match component {
                Component::Normal(name) => name.to_str(),
                _ => None,
            })
            .flat_map(|name| name.split(|c: char| !c.is_alphanumeric()))
            .any(|word| {
                let word = word.to_lowercase();
                self.skip_root_markers.iter().any(|marker| {
                    !marker.is_empty() && word.starts_with(&marker.to_lowercase())
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_exclude_the_java_namespace() {
        let config = Config::default();

        assert_eq!(config.excluded_namespaces, vec!["java"]);
        assert_eq!(config.manifest_file_name, "suite.py");
        assert_eq!(config.top_extensions, 10);
        assert!(config.projects.is_empty());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml_str("projects: [compiler, sdk]\n").unwrap();

        assert_eq!(
            config.projects,
            vec![PathBuf::from("compiler"), PathBuf::from("sdk")]
        );
        assert_eq!(config.excluded_namespaces, vec!["java"]);
    }

    #[test]
    fn empty_yaml_is_default() {
        assert_eq!(Config::from_yaml_str("  \n").unwrap(), Config::default());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_yaml_str("exclude_namespaces: [java]\n").is_err());
    }

    #[test]
    fn load_reports_path_on_invalid_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "top_extensions: many\n").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains(".jxref.yaml"));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();

        assert_eq!(Config::discover(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn discover_reads_repo_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "excluded_namespaces: [java, javax]\n",
        )
        .unwrap();

        let config = Config::discover(dir.path()).unwrap();

        assert_eq!(config.excluded_namespaces, vec!["java", "javax"]);
    }

    #[test]
    fn hidden_and_build_dirs_are_excluded() {
        let config = Config::default();

        assert!(config.is_excluded_dir(".git"));
        assert!(config.is_excluded_dir("target"));
        assert!(!config.is_excluded_dir("src"));
    }

    #[test]
    fn test_and_benchmark_roots_are_skipped() {
        let config = Config::default();

        assert!(config.is_skipped_root(Path::new("/repo/compiler/src/org.graal.test/src")));
        assert!(config.is_skipped_root(Path::new("/repo/sdk/benchmarks/src")));
        assert!(!config.is_skipped_root(Path::new("/repo/sdk/src/org.graal.sdk/src")));
    }

    #[test]
    fn markers_only_match_at_word_starts() {
        let config = Config::default();

        assert!(!config.is_skipped_root(Path::new("contest/src")));
        assert!(!config.is_skipped_root(Path::new("latest/src/main/java")));
        assert!(config.is_skipped_root(Path::new("tools/src/test/java")));
        assert!(config.is_skipped_root(Path::new("compiler/src/org.graal.compiler.test-util/src")));
        assert!(config.is_skipped_root(Path::new("jmh/Benchmark/src")));
    }
}
