//! Import-guided resolution of references that failed eager resolution.
//!
//! A pending reference only knows the originating class and a bare name used
//! as a receiver (`Helper.run()`). Once the whole corpus is cataloged, the
//! name is matched against every known class with that simple name, and the
//! originating class's imports pick one: the first candidate whose qualified
//! name starts with some dotted prefix of some import wins.
//!
//! Candidates and imports are tried in lexicographic order, and each import's
//! prefixes from longest to shortest, so the outcome is reproducible. The match
//! is a best guess; nothing guarantees it is the class the source meant.

use crate::catalog::EntityCatalog;

/// A usage site queued for resolution after the scan.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PendingReference {
    /// The class containing the usage site.
    pub from_class: String,
    /// The bare identifier used as the site's scope.
    pub name: String,
}

impl PendingReference {
    /// Create a pending reference.
    #[must_use]
    pub fn new(from_class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            from_class: from_class.into(),
            name: name.into(),
        }
    }
}

/// Guess the fully-qualified class a bare name refers to.
///
/// Returns `None` when no candidate matches any import prefix.
#[must_use]
pub fn resolve_class_reference<'a>(
    catalog: &'a EntityCatalog,
    from_class: &str,
    name: &str,
) -> Option<&'a str> {
    let candidates = catalog.classes_ending_with(name);
    if candidates.is_empty() {
        return None;
    }
    let imports: Vec<&str> = catalog.imports_of(from_class).collect();

    candidates.into_iter().find(|candidate| {
        imports
            .iter()
            .any(|import| import_prefixes(import).any(|prefix| candidate.starts_with(prefix)))
    })
}

/// Dotted prefixes of an import, longest first: `a.b.C` yields `a.b.C`, `a.b`, `a`.
fn import_prefixes(import: &str) -> impl Iterator<Item = &str> {
    let cuts = import
        .match_indices('.')
        .map(|(i, _)| i)
        .rev()
        .map(move |i| &import[..i]);
    std::iter::once(import).chain(cuts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_with(classes: &[(&str, &str)], importer: &str, imports: &[&str]) -> EntityCatalog {
        let mut catalog = EntityCatalog::new();
        for (class, package) in classes {
            catalog.register_class(class, package);
        }
        catalog.register_class(importer, "origin");
        catalog.record_imports(importer, imports.iter().copied());
        catalog
    }

    #[test]
    fn prefixes_run_from_full_import_to_first_segment() {
        let prefixes: Vec<_> = import_prefixes("a.b.Something").collect();

        assert_eq!(prefixes, vec!["a.b.Something", "a.b", "a"]);
        assert_eq!(import_prefixes("single").collect::<Vec<_>>(), vec!["single"]);
    }

    #[test]
    fn import_prefix_selects_matching_candidate() {
        let catalog = catalog_with(
            &[("a.b.Foo", "a.b"), ("x.y.Foo", "x.y")],
            "origin.User",
            &["a.b.Something"],
        );

        assert_eq!(
            resolve_class_reference(&catalog, "origin.User", "Foo"),
            Some("a.b.Foo")
        );
    }

    #[test]
    fn no_shared_prefix_means_no_match() {
        let catalog = catalog_with(&[("m.n.Bar", "m.n")], "origin.User", &["p.q.Other"]);

        assert_eq!(resolve_class_reference(&catalog, "origin.User", "Bar"), None);
    }

    #[test]
    fn unknown_name_has_no_candidates() {
        let catalog = catalog_with(&[("a.b.Foo", "a.b")], "origin.User", &["a.b.Foo"]);

        assert_eq!(resolve_class_reference(&catalog, "origin.User", "Baz"), None);
    }

    #[test]
    fn class_without_imports_never_matches() {
        let catalog = catalog_with(&[("a.b.Foo", "a.b")], "origin.User", &[]);

        assert_eq!(resolve_class_reference(&catalog, "origin.User", "Foo"), None);
    }

    #[test]
    fn shortest_prefix_still_matches() {
        // Only the first segment is shared.
        let catalog = catalog_with(
            &[("org.other.Foo", "org.other")],
            "origin.User",
            &["org.acme.Thing"],
        );

        assert_eq!(
            resolve_class_reference(&catalog, "origin.User", "Foo"),
            Some("org.other.Foo")
        );
    }

    #[test]
    fn ambiguity_resolves_to_lexicographically_first_candidate() {
        let catalog = catalog_with(
            &[("org.b.Foo", "org.b"), ("org.a.Foo", "org.a")],
            "origin.User",
            &["org.z.Thing"],
        );

        assert_eq!(
            resolve_class_reference(&catalog, "origin.User", "Foo"),
            Some("org.a.Foo")
        );
    }

    #[test]
    fn prefix_match_is_plain_string_prefix() {
        // `a.bc.Foo` starts with the import prefix `a.b`.
        let catalog = catalog_with(&[("a.bc.Foo", "a.bc")], "origin.User", &["a.b.Thing"]);

        assert_eq!(
            resolve_class_reference(&catalog, "origin.User", "Foo"),
            Some("a.bc.Foo")
        );
    }
}
