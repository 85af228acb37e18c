//! Directed reference edges at class and package granularity.
//!
//! Edges have set semantics: recording a pair twice leaves one edge. Targets
//! inside an excluded namespace (the platform library by default) are never
//! recorded.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

/// Namespace roots whose entities never appear as edge targets.
///
/// A name falls inside a root when it equals the root or continues it with a
/// `.`; `java` covers `java.util.List` but not `javax.swing` or `javafx`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludedNamespaces {
    roots: Vec<String>,
}

impl ExcludedNamespaces {
    /// Build a filter from namespace roots. Empty roots and trailing dots are ignored.
    #[must_use]
    pub fn new<I, S>(roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roots = roots
            .into_iter()
            .map(|r| r.as_ref().trim_end_matches('.').to_string())
            .filter(|r| !r.is_empty())
            .collect();
        Self { roots }
    }

    /// Check whether a package or class name falls inside an excluded root.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.roots.iter().any(|root| {
            name.strip_prefix(root.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
        })
    }

    /// Check whether a reference target is excluded, by its package or by the
    /// class itself. A target without a known package is judged by its class.
    #[must_use]
    pub fn covers_target(&self, package: Option<&str>, class: &str) -> bool {
        package.is_some_and(|package| self.contains(package)) || self.contains(class)
    }
}

/// Append-only class and package reference graphs.
#[derive(Debug, Clone, Default)]
pub struct ReferenceRecorder {
    excluded: ExcludedNamespaces,
    class_references: BTreeMap<String, BTreeSet<String>>,
    package_references: BTreeMap<String, BTreeSet<String>>,
}

impl ReferenceRecorder {
    /// Create an empty recorder with the given exclusion filter.
    #[must_use]
    pub fn new(excluded: ExcludedNamespaces) -> Self {
        Self {
            excluded,
            ..Self::default()
        }
    }

    /// The exclusion filter applied to targets.
    #[must_use]
    pub fn excluded(&self) -> &ExcludedNamespaces {
        &self.excluded
    }

    /// Record that class `from` references class `to`.
    ///
    /// Returns `true` if a new edge was inserted.
    pub fn record_class_reference(&mut self, from: &str, to: &str) -> bool {
        Self::insert(&self.excluded, &mut self.class_references, from, to)
    }

    /// Record that package `from` references package `to`.
    ///
    /// Returns `true` if a new edge was inserted.
    pub fn record_package_reference(&mut self, from: &str, to: &str) -> bool {
        Self::insert(&self.excluded, &mut self.package_references, from, to)
    }

    fn insert(
        excluded: &ExcludedNamespaces,
        edges: &mut BTreeMap<String, BTreeSet<String>>,
        from: &str,
        to: &str,
    ) -> bool {
        if excluded.contains(to) {
            trace!(from, to, "Target in excluded namespace, not recorded");
            return false;
        }
        edges
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string())
    }

    /// All class edges as `(from, to)`.
    pub fn class_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        flatten(&self.class_references)
    }

    /// All package edges as `(from, to)`.
    pub fn package_edges(&self) -> impl Iterator<Item = (&str, &str)> {
        flatten(&self.package_references)
    }

    /// Check for a class edge.
    #[must_use]
    pub fn contains_class_edge(&self, from: &str, to: &str) -> bool {
        self.class_references
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Check for a package edge.
    #[must_use]
    pub fn contains_package_edge(&self, from: &str, to: &str) -> bool {
        self.package_references
            .get(from)
            .is_some_and(|targets| targets.contains(to))
    }

    /// Number of distinct class edges.
    #[must_use]
    pub fn class_edge_count(&self) -> usize {
        self.class_references.values().map(BTreeSet::len).sum()
    }

    /// Number of distinct package edges.
    #[must_use]
    pub fn package_edge_count(&self) -> usize {
        self.package_references.values().map(BTreeSet::len).sum()
    }
}

fn flatten(edges: &BTreeMap<String, BTreeSet<String>>) -> impl Iterator<Item = (&str, &str)> {
    edges
        .iter()
        .flat_map(|(from, targets)| targets.iter().map(move |to| (from.as_str(), to.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn recorder() -> ReferenceRecorder {
        ReferenceRecorder::new(ExcludedNamespaces::new(["java"]))
    }

    #[rstest]
    #[case::root_itself("java", true)]
    #[case::sub_package("java.util", true)]
    #[case::class("java.util.List", true)]
    #[case::sibling_prefix("javax.swing", false)]
    #[case::longer_word("javafx.scene.Node", false)]
    #[case::unrelated("org.acme.java", false)]
    fn exclusion_respects_segment_boundaries(#[case] name: &str, #[case] expected: bool) {
        let excluded = ExcludedNamespaces::new(["java"]);

        assert_eq!(excluded.contains(name), expected);
    }

    #[rstest]
    #[case::by_package(Some("java.util"), "java.util.List", true)]
    #[case::by_class(Some("org.lib"), "org.lib.Api", true)]
    #[case::unknown_package(None, "org.lib.Api", true)]
    #[case::sibling_class(Some("org.lib"), "org.lib.Apis", false)]
    fn targets_are_excluded_by_package_or_class(
        #[case] package: Option<&str>,
        #[case] class: &str,
        #[case] expected: bool,
    ) {
        let excluded = ExcludedNamespaces::new(["java", "org.lib.Api"]);

        assert_eq!(excluded.covers_target(package, class), expected);
    }

    #[test]
    fn exclusion_accepts_trailing_dot_roots() {
        let excluded = ExcludedNamespaces::new(["java.", ""]);

        assert!(excluded.contains("java.lang.String"));
        assert!(!excluded.contains("org.acme"));
    }

    #[test]
    fn recording_twice_yields_one_edge() {
        let mut rec = recorder();

        assert!(rec.record_class_reference("pkg.A", "pkg.B"));
        assert!(!rec.record_class_reference("pkg.A", "pkg.B"));

        assert_eq!(rec.class_edge_count(), 1);
        assert_eq!(rec.class_edges().collect::<Vec<_>>(), vec![("pkg.A", "pkg.B")]);
    }

    #[test]
    fn excluded_targets_are_not_recorded() {
        let mut rec = recorder();

        assert!(!rec.record_class_reference("pkg.A", "java.util.List"));
        assert!(!rec.record_package_reference("pkg", "java.util"));

        assert_eq!(rec.class_edge_count(), 0);
        assert_eq!(rec.package_edge_count(), 0);
    }

    #[test]
    fn package_self_edges_are_permitted() {
        let mut rec = recorder();

        assert!(rec.record_package_reference("pkg", "pkg"));
        assert!(rec.contains_package_edge("pkg", "pkg"));
    }

    #[test]
    fn class_and_package_graphs_are_independent() {
        let mut rec = recorder();
        rec.record_class_reference("pkg.A", "pkg.util.B");

        assert!(rec.contains_class_edge("pkg.A", "pkg.util.B"));
        assert!(!rec.contains_package_edge("pkg.A", "pkg.util.B"));
        assert_eq!(rec.package_edges().count(), 0);
    }

    proptest! {
        #[test]
        fn edge_count_equals_distinct_pairs(
            pairs in proptest::collection::vec(("[a-c]\\.[A-C]", "[a-c]\\.[A-C]"), 0..40)
        ) {
            let mut rec = recorder();
            for (from, to) in &pairs {
                rec.record_class_reference(from, to);
            }

            let distinct: BTreeSet<_> = pairs.iter().collect();
            prop_assert_eq!(rec.class_edge_count(), distinct.len());
        }

        #[test]
        fn excluded_targets_never_appear(
            pairs in proptest::collection::vec(
                ("[a-z]{1,3}", "(java|javax|org)\\.[a-z]{1,3}"),
                0..40,
            )
        ) {
            let mut rec = recorder();
            for (from, to) in &pairs {
                rec.record_package_reference(from, to);
            }

            prop_assert!(rec.package_edges().all(|(_, to)| !to.starts_with("java.")));
        }
    }
}
