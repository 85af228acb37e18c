//! # jxref: Cross-Reference Graphs for Java Corpora
//!
//! jxref scans a repository of Java sources with tree-sitter and builds two
//! directed graphs: which classes reference which classes, and which packages
//! reference which packages. It also reads suite manifests for project-level
//! dependencies, counts file extensions and collects source comments.
//!
//! ## Design Philosophy
//!
//! - **Approximate, not exact** - Sites the scanner cannot attribute are retried
//!   with an import-prefix heuristic once the whole corpus is known
//! - **Best effort** - Unparsable files are reported and skipped, never fatal
//! - **Deterministic** - The same corpus always yields the same graphs
//! - **Library first, CLI second**
//!
//! ## Quick Start
//!
//! ```no_run
//! use jxref::Jxref;
//! use std::path::Path;
//!
//! let jxref = Jxref::open(Path::new("/path/to/repo"))?;
//!
//! let report = jxref.analyze_sources()?;
//! for (from, to) in report.graphs.package_edges() {
//!     println!("{from} -> {to}");
//! }
//! println!(
//!     "{:.0}% of usage sites attributed",
//!     report.graphs.stats().resolution_rate() * 100.0
//! );
//! # Ok::<(), jxref::Error>(())
//! ```

pub mod analysis;
pub mod catalog;
pub mod comments;
pub mod config;
pub mod discovery;
mod error;
pub mod extensions;
pub mod graph;
pub mod languages;
pub mod manifest;
mod parallel;
pub mod recorder;
pub mod render;
pub mod resolver;
pub mod scanner;
mod types;

pub use analysis::{ReferenceGraphs, SourceAnalysis};
pub use comments::SourceComments;
pub use config::Config;
pub use error::{Error, Result, ScanError, ScanErrorKind};
pub use scanner::{CorpusScanner, JavaScanner, ScanBatch};
pub use types::{
    AnalysisStats, CompilationUnit, Cycle, DeclaredType, Edge, Language, ProjectReport,
    Resolution, ResolvedTarget, ScopeShape, SourceReport, UsageKind, UsageSite,
};

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

use discovery::discover_source_roots;
use extensions::ExtensionStats;
use manifest::{discover_manifests, read_manifest, ProjectDependencies};

/// Entry point for analyzing one repository.
#[derive(Debug, Clone)]
pub struct Jxref {
    repo_root: PathBuf,
    config: Config,
}

impl Jxref {
    /// Create an analyzer for a repository with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the repository root does not exist.
    pub fn new(repo_root: &Path, config: Config) -> Result<Self> {
        let repo_root = repo_root.canonicalize().map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("repository root not found: {}", repo_root.display()),
            ))
        })?;

        Ok(Self { repo_root, config })
    }

    /// Create an analyzer using `<repo_root>/.jxref.yaml` when present.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the repository root does not exist and
    /// `Error::Config` if the configuration file is invalid.
    pub fn open(repo_root: &Path) -> Result<Self> {
        let config = Config::discover(repo_root)?;
        Self::new(repo_root, config)
    }

    /// The canonical repository root.
    #[must_use]
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// The configuration in effect.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directories scanned for sources: the configured projects, or the
    /// repository root when none are configured.
    #[must_use]
    pub fn project_dirs(&self) -> Vec<PathBuf> {
        if self.config.projects.is_empty() {
            return vec![self.repo_root.clone()];
        }
        self.config
            .projects
            .iter()
            .map(|project| self.repo_root.join(project))
            .collect()
    }

    // === Source analysis ===

    /// Build the class and package graphs with the tree-sitter Java scanner.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyCorpus` if no compilation unit could be scanned.
    pub fn analyze_sources(&self) -> Result<SourceReport> {
        self.analyze_sources_with(&JavaScanner)
    }

    /// Build the class and package graphs with a custom scanner.
    ///
    /// Every source root of every project is scanned and recorded before any
    /// pending reference is resolved.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyCorpus` if no compilation unit could be scanned.
    pub fn analyze_sources_with(&self, scanner: &dyn CorpusScanner) -> Result<SourceReport> {
        let start = Instant::now();
        let mut analysis = SourceAnalysis::from_config(&self.config);
        let mut roots_analyzed = Vec::new();
        let mut roots_skipped = Vec::new();
        let mut directories_skipped = Vec::new();
        let mut errors = Vec::new();
        let mut comments = SourceComments::new();
        let mut units_scanned = 0;

        for project_dir in self.project_dirs() {
            let discovery = match discover_source_roots(&project_dir, &self.config) {
                Ok(d) => d,
                Err(e) => {
                    warn!(
                        project = %project_dir.display(),
                        error = %e,
                        "Cannot scan project, skipping"
                    );
                    directories_skipped.push((project_dir, e.to_string()));
                    continue;
                }
            };
            roots_skipped.extend(discovery.skipped_roots);
            directories_skipped.extend(discovery.directories_skipped);

            for root in discovery.roots {
                info!(
                    root = %root.path.display(),
                    files = root.files.len(),
                    "Analyzing source root"
                );
                let project = self.project_id(&root.path);
                let batch = scanner.scan(&root);
                units_scanned += batch.units.len();
                for unit in &batch.units {
                    analysis.add_unit(&project, unit);
                    comments.add_unit(&project, unit);
                }
                errors.extend(batch.errors);
                roots_analyzed.push(root.path);
            }
        }

        if units_scanned == 0 {
            return Err(Error::EmptyCorpus(self.repo_root.clone()));
        }

        debug!(
            units = units_scanned,
            pending = analysis.pending_count(),
            "Scan complete"
        );
        let graphs = analysis.finish();

        Ok(SourceReport {
            graphs,
            roots_analyzed,
            roots_skipped,
            directories_skipped,
            errors,
            comments,
            duration: start.elapsed(),
        })
    }

    /// Name a source root by its path relative to the repository root.
    fn project_id(&self, root: &Path) -> String {
        match root.strip_prefix(&self.repo_root) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => root.display().to_string(),
        }
    }

    // === Project analysis ===

    /// Collect project dependencies from every suite manifest.
    ///
    /// Manifests that cannot be read or name no project are reported in the
    /// result and otherwise ignored.
    #[must_use]
    pub fn analyze_projects(&self) -> ProjectReport {
        let start = Instant::now();
        let mut dependencies = ProjectDependencies::new();
        let mut manifests_read = 0;
        let mut errors = Vec::new();

        for path in discover_manifests(&self.repo_root, &self.config) {
            match read_manifest(&path) {
                Ok(manifest) => {
                    dependencies.add_manifest(&manifest);
                    manifests_read += 1;
                }
                Err(e) => {
                    warn!(
                        manifest = %path.display(),
                        error = %e,
                        "Manifest could not be parsed, skipping"
                    );
                    errors.push(e);
                }
            }
        }

        ProjectReport {
            dependencies,
            manifests_read,
            errors,
            duration: start.elapsed(),
        }
    }

    // === Extension statistics ===

    /// Count file extensions under the repository root.
    #[must_use]
    pub fn extension_stats(&self) -> ExtensionStats {
        ExtensionStats::collect(&self.repo_root)
    }
}
