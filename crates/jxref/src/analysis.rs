//! Two-phase construction of the class and package reference graphs.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ SourceAnalysis (one per run)                                 │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Phase 1: add_unit() per compilation unit                     │
//! │   - register classes, packages, imports                      │
//! │   - resolved sites      → class + package edge               │
//! │   - bare-name failures  → pending queue                      │
//! │   - other failures      → dropped                            │
//! │ Barrier: finish(self) consumes the context                   │
//! │ Phase 2: pending queue  → import heuristic → edges           │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Phase 2 needs the complete catalog: a pending reference may name a class
//! that is only registered by a unit scanned later. Taking `self` by value in
//! `finish` makes adding units after the heuristic has run impossible.
//!
//! Exclusion is decided once per target, on its package and its class name,
//! so an excluded target never shows up in either graph.

use std::collections::BTreeMap;

use tracing::{debug, info, trace};

use crate::catalog::EntityCatalog;
use crate::config::Config;
use crate::recorder::{ExcludedNamespaces, ReferenceRecorder};
use crate::resolver::{resolve_class_reference, PendingReference};
use crate::types::{AnalysisStats, CompilationUnit, Edge, Resolution, ResolvedTarget};

/// Run context of a source analysis, open for new compilation units.
#[derive(Debug)]
pub struct SourceAnalysis {
    catalog: EntityCatalog,
    recorder: ReferenceRecorder,
    /// Distinct pending references with the number of sites behind each
    pending: BTreeMap<PendingReference, usize>,
    stats: AnalysisStats,
}

impl SourceAnalysis {
    /// Start a run excluding the given namespaces.
    #[must_use]
    pub fn new(excluded: ExcludedNamespaces) -> Self {
        Self {
            catalog: EntityCatalog::new(),
            recorder: ReferenceRecorder::new(excluded),
            pending: BTreeMap::new(),
            stats: AnalysisStats::default(),
        }
    }

    /// Start a run with the namespaces excluded by `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ExcludedNamespaces::new(&config.excluded_namespaces))
    }

    /// Record one compilation unit scanned from `project`.
    ///
    /// Classes of a unit without a package declaration are not cataloged and
    /// produce no eager edges; their unresolved bare-name sites are still queued
    /// but cannot match without an import table.
    pub fn add_unit(&mut self, project: &str, unit: &CompilationUnit) {
        self.stats.units_recorded += 1;

        let package = unit.package.as_deref();
        match package {
            Some(package) => {
                self.catalog.register_project_package(project, package);
                for declared in &unit.types {
                    self.catalog.register_class(&declared.qualified_name, package);
                    self.catalog
                        .record_imports(&declared.qualified_name, unit.imports.iter().cloned());
                    self.stats.classes_registered += 1;
                }
            }
            None => {
                self.stats.units_without_package += 1;
                debug!(path = %unit.path.display(), "Unit declares no package");
            }
        }

        for declared in &unit.types {
            for site in &declared.usages {
                self.stats.usage_sites += 1;
                match &site.resolution {
                    Resolution::Resolved(target) => match package {
                        Some(package) => {
                            self.record_eager(&declared.qualified_name, package, target);
                        }
                        None => {
                            trace!(
                                class = %declared.qualified_name,
                                target = %target.qualified_type,
                                line = site.line,
                                "Resolved site in default package, no edge recorded"
                            );
                            self.stats.resolved_without_package += 1;
                        }
                    },
                    Resolution::Unresolved(scope) => match scope.bare_identifier() {
                        Some(name) => {
                            *self
                                .pending
                                .entry(PendingReference::new(&declared.qualified_name, name))
                                .or_default() += 1;
                            self.stats.pending_queued += 1;
                        }
                        None => {
                            trace!(
                                class = %declared.qualified_name,
                                kind = site.kind.as_str(),
                                line = site.line,
                                "Unresolvable scope, site dropped"
                            );
                            self.stats.dropped_at_gate += 1;
                        }
                    },
                }
            }
        }
    }

    fn record_eager(&mut self, from_class: &str, from_package: &str, target: &ResolvedTarget) {
        if self
            .recorder
            .excluded()
            .covers_target(Some(&target.package), &target.qualified_type)
        {
            self.stats.excluded += 1;
            return;
        }
        self.recorder
            .record_class_reference(from_class, &target.qualified_type);
        self.recorder
            .record_package_reference(from_package, &target.package);
        self.stats.eager_resolved += 1;
    }

    /// Number of distinct `(class, name)` references waiting for phase 2.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Catalog as filled so far.
    #[must_use]
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Close the scan phase and resolve every pending reference.
    #[must_use]
    pub fn finish(mut self) -> ReferenceGraphs {
        let pending = std::mem::take(&mut self.pending);
        debug!(pending = pending.len(), "Resolving pending references");

        for (reference, sites) in pending {
            self.resolve_pending(&reference, sites);
        }

        info!(
            classes = self.catalog.class_count(),
            packages = self.catalog.package_count(),
            class_edges = self.recorder.class_edge_count(),
            package_edges = self.recorder.package_edge_count(),
            heuristic_resolved = self.stats.heuristic_resolved,
            heuristic_misses = self.stats.heuristic_misses,
            "Reference graphs complete"
        );

        ReferenceGraphs {
            catalog: self.catalog,
            recorder: self.recorder,
            stats: self.stats,
        }
    }

    /// Resolve one distinct reference; `sites` usage sites share its outcome.
    fn resolve_pending(&mut self, reference: &PendingReference, sites: usize) {
        let Some(target) =
            resolve_class_reference(&self.catalog, &reference.from_class, &reference.name)
        else {
            trace!(
                from = %reference.from_class,
                name = %reference.name,
                "No candidate matches the imports, reference dropped"
            );
            self.stats.heuristic_misses += sites;
            return;
        };

        let target_package = self.catalog.lookup_package(target);
        if self.recorder.excluded().covers_target(target_package, target) {
            self.stats.excluded += sites;
            return;
        }

        self.recorder
            .record_class_reference(&reference.from_class, target);
        if let (Some(from_package), Some(target_package)) =
            (self.catalog.lookup_package(&reference.from_class), target_package)
        {
            self.recorder
                .record_package_reference(from_package, target_package);
        }
        self.stats.heuristic_resolved += sites;
    }
}

/// The finished graphs of a run.
#[derive(Debug, Clone)]
pub struct ReferenceGraphs {
    catalog: EntityCatalog,
    recorder: ReferenceRecorder,
    stats: AnalysisStats,
}

impl ReferenceGraphs {
    /// Class → class edges.
    pub fn class_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.recorder.class_edges()
    }

    /// Package → package edges.
    pub fn package_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.recorder.package_edges()
    }

    /// Class edges as owned values, sorted.
    #[must_use]
    pub fn class_edge_list(&self) -> Vec<Edge> {
        self.class_edges().map(|(f, t)| Edge::new(f, t)).collect()
    }

    /// Package edges as owned values, sorted.
    #[must_use]
    pub fn package_edge_list(&self) -> Vec<Edge> {
        self.package_edges().map(|(f, t)| Edge::new(f, t)).collect()
    }

    /// The entity catalog of the run.
    #[must_use]
    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// The edge recorder of the run.
    #[must_use]
    pub fn recorder(&self) -> &ReferenceRecorder {
        &self.recorder
    }

    /// Coverage statistics of the run.
    #[must_use]
    pub fn stats(&self) -> &AnalysisStats {
        &self.stats
    }
}
