//! Domain types for jxref.
//!
//! These types represent the core domain model:
//! - **Scanner output**: `CompilationUnit`, `DeclaredType`, `UsageSite` (what the
//!   corpus scanner hands to the resolution engine)
//! - **Graph output**: `Edge`, `Cycle` (what rendering and auditing consume)
//! - **Results**: `AnalysisStats`, `SourceReport`, `ProjectReport` (outcome of one run)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Entity identity | `String` names | Packages and classes are identified by dotted names |
//! | Resolution | Enum, not `Option` | A failed site must carry its scope shape |
//! | Usage ownership | Nested in `DeclaredType` | Every site belongs to exactly one originating class |

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::analysis::ReferenceGraphs;
use crate::comments::SourceComments;
use crate::error::ScanError;
use crate::manifest::ProjectDependencies;

// ============================================================================
// Enums
// ============================================================================

/// Supported source languages.
///
/// Adding a new language requires implementing the `LanguageSupport` trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Java source files (`.java`)
    Java,
}

impl Language {
    /// File extensions handled by this language.
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Java => &["java"],
        }
    }

    /// Detect language from file extension.
    ///
    /// # Returns
    ///
    /// `None` if the extension is not recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "java" => Some(Self::Java),
            _ => None,
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Java => "java",
        }
    }
}

/// How a usage site touches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageKind {
    /// Method invocation (`scope.method(..)`)
    Call,
    /// Field access (`scope.field`)
    FieldAccess,
}

impl UsageKind {
    /// Short lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::FieldAccess => "field_access",
        }
    }
}

/// Syntactic shape of the scope (receiver) of an unresolved usage site.
///
/// Only `BareIdentifier` gives the heuristic resolver anything to work with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeShape {
    /// No scope at all (`method()`)
    Absent,
    /// A single plain name (`Helper.method()`, `config.value`)
    BareIdentifier(String),
    /// Anything else: chained accesses, call results, literals, `this`, `super`
    Compound,
}

impl ScopeShape {
    /// The bare identifier, if this scope is one.
    #[must_use]
    pub fn bare_identifier(&self) -> Option<&str> {
        match self {
            Self::BareIdentifier(name) => Some(name),
            Self::Absent | Self::Compound => None,
        }
    }
}

// ============================================================================
// Scanner output
// ============================================================================

/// The declaring entity of a successfully resolved usage site.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedTarget {
    /// Package declaring the target type (e.g. `org.acme.util`)
    pub package: String,
    /// Fully-qualified name of the declaring type (e.g. `org.acme.util.Strings`)
    pub qualified_type: String,
}

impl ResolvedTarget {
    /// Create a resolved target.
    #[must_use]
    pub fn new(package: impl Into<String>, qualified_type: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            qualified_type: qualified_type.into(),
        }
    }
}

/// Outcome of eager resolution for one usage site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The scanner identified the declaring type.
    Resolved(ResolvedTarget),
    /// The scanner could not resolve the site; the scope shape decides whether
    /// it can be retried after the whole corpus is known.
    Unresolved(ScopeShape),
}

/// A method call or field access found inside a declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSite {
    /// Call or field access
    pub kind: UsageKind,
    /// Eager resolution outcome
    pub resolution: Resolution,
    /// Line number (1-indexed)
    pub line: u32,
}

impl UsageSite {
    /// A site the scanner resolved eagerly.
    #[must_use]
    pub fn resolved(kind: UsageKind, target: ResolvedTarget, line: u32) -> Self {
        Self {
            kind,
            resolution: Resolution::Resolved(target),
            line,
        }
    }

    /// A site the scanner could not resolve.
    #[must_use]
    pub fn unresolved(kind: UsageKind, scope: ScopeShape, line: u32) -> Self {
        Self {
            kind,
            resolution: Resolution::Unresolved(scope),
            line,
        }
    }
}

/// A top-level type declared in a compilation unit, with every usage site
/// found in its body (including bodies of nested types).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    /// Fully-qualified name (e.g. `org.acme.Main`)
    pub qualified_name: String,
    /// Usage sites in source order
    pub usages: Vec<UsageSite>,
}

impl DeclaredType {
    /// Create a declared type.
    #[must_use]
    pub fn new(qualified_name: impl Into<String>, usages: Vec<UsageSite>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            usages,
        }
    }
}

/// One parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Path of the source file
    pub path: PathBuf,
    /// Declared package, `None` for the default package
    pub package: Option<String>,
    /// Import declarations as dotted names (wildcards stripped)
    pub imports: Vec<String>,
    /// Top-level declared types
    pub types: Vec<DeclaredType>,
    /// Comment texts in source order, delimiters included
    pub comments: Vec<String>,
}

impl CompilationUnit {
    /// Total number of usage sites across all declared types.
    #[must_use]
    pub fn usage_count(&self) -> usize {
        self.types.iter().map(|t| t.usages.len()).sum()
    }
}

// ============================================================================
// Graph output
// ============================================================================

/// A directed reference between two entities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// The using entity
    pub from: String,
    /// The used entity
    pub to: String,
}

impl Edge {
    /// Create an edge from borrowed names.
    #[must_use]
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// A circular dependency between packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    /// Packages involved in the cycle, sorted by name
    pub packages: Vec<String>,
}

// ============================================================================
// Operation Results
// ============================================================================

/// Coverage statistics of one source analysis run.
///
/// Returned as part of `ReferenceGraphs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Compilation units fed into the run
    pub units_recorded: usize,
    /// Units skipped because they declare no package
    pub units_without_package: usize,
    /// Class registrations performed
    pub classes_registered: usize,
    /// Usage sites seen during phase 1
    pub usage_sites: usize,
    /// Sites resolved eagerly and recorded as edges
    pub eager_resolved: usize,
    /// Resolved sites of default-package units, which have no package to record from
    pub resolved_without_package: usize,
    /// Resolved sites (eager or heuristic) whose target was excluded
    pub excluded: usize,
    /// Unresolved sites queued for phase 2
    pub pending_queued: usize,
    /// Unresolved sites dropped because their scope is not a bare identifier
    pub dropped_at_gate: usize,
    /// Queued sites the import heuristic resolved
    pub heuristic_resolved: usize,
    /// Queued sites with no candidate/import match
    pub heuristic_misses: usize,
}

impl AnalysisStats {
    /// Usage sites attributed to a target, whether or not an edge was recorded
    /// for them (excluded targets and default-package sources count).
    #[must_use]
    pub fn resolved_sites(&self) -> usize {
        self.eager_resolved
            + self.heuristic_resolved
            + self.excluded
            + self.resolved_without_package
    }

    /// Fraction of usage sites attributed to a target, in `0.0..=1.0`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn resolution_rate(&self) -> f64 {
        if self.usage_sites == 0 {
            return 0.0;
        }
        self.resolved_sites() as f64 / self.usage_sites as f64
    }
}

/// Outcome of a source analysis over every configured project.
///
/// Returned by `Jxref::analyze_sources()`.
#[derive(Debug)]
pub struct SourceReport {
    /// The finished class and package graphs
    pub graphs: ReferenceGraphs,
    /// Source roots that were scanned
    pub roots_analyzed: Vec<PathBuf>,
    /// Source roots skipped as test or benchmark trees
    pub roots_skipped: Vec<PathBuf>,
    /// Directories that could not be read (path, error reason)
    pub directories_skipped: Vec<(PathBuf, String)>,
    /// Files that could not be scanned (non-fatal)
    pub errors: Vec<ScanError>,
    /// Comments of the scanned roots, keyed like the projects of the catalog
    pub comments: SourceComments,
    /// How long the analysis took
    pub duration: Duration,
}

/// Outcome of reading every suite manifest of a repository.
///
/// Returned by `Jxref::analyze_projects()`.
#[derive(Debug)]
pub struct ProjectReport {
    /// Project → dependency edges
    pub dependencies: ProjectDependencies,
    /// Manifests read successfully
    pub manifests_read: usize,
    /// Manifests that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
    /// How long the analysis took
    pub duration: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension_recognizes_java() {
        assert_eq!(Language::from_extension("java"), Some(Language::Java));
        assert_eq!(Language::from_extension("JAVA"), Some(Language::Java));
    }

    #[test]
    fn language_from_extension_returns_none_for_unknown() {
        assert_eq!(Language::from_extension("kt"), None);
        assert_eq!(Language::from_extension("class"), None);
        assert_eq!(Language::from_extension(""), None);
    }

    #[test]
    fn scope_shape_exposes_only_bare_identifiers() {
        assert_eq!(
            ScopeShape::BareIdentifier("Helper".to_string()).bare_identifier(),
            Some("Helper")
        );
        assert_eq!(ScopeShape::Absent.bare_identifier(), None);
        assert_eq!(ScopeShape::Compound.bare_identifier(), None);
    }

    #[test]
    fn usage_count_sums_over_declared_types() {
        let site = UsageSite::unresolved(UsageKind::Call, ScopeShape::Absent, 1);
        let unit = CompilationUnit {
            path: PathBuf::from("A.java"),
            package: Some("pkg".to_string()),
            imports: vec![],
            types: vec![
                DeclaredType::new("pkg.A", vec![site.clone(), site.clone()]),
                DeclaredType::new("pkg.B", vec![site]),
            ],
            comments: vec![],
        };

        assert_eq!(unit.usage_count(), 3);
    }

    #[test]
    fn resolution_rate_is_zero_without_sites() {
        assert!(AnalysisStats::default().resolution_rate().abs() < f64::EPSILON);
    }

    #[test]
    fn resolution_rate_counts_every_attributed_site() {
        let stats = AnalysisStats {
            usage_sites: 10,
            eager_resolved: 3,
            heuristic_resolved: 1,
            excluded: 1,
            resolved_without_package: 1,
            ..AnalysisStats::default()
        };

        assert_eq!(stats.resolved_sites(), 6);
        assert!((stats.resolution_rate() - 0.6).abs() < f64::EPSILON);
    }
}
