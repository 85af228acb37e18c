//! Registry of known projects, packages and classes.
//!
//! The catalog is filled during the scan phase and only read afterwards. It
//! tracks four relations:
//!
//! - project → packages observed in it
//! - package → every class ever registered under it (never shrinks)
//! - class → its current package (last registration wins)
//! - class → import declarations of its compilation unit
//!
//! A class re-registered under another package is rebound, but stays listed
//! under the old package too, so `classes_in` and `lookup_package` can disagree
//! after such an overwrite.
//!
//! All maps are ordered so every enumeration is reproducible.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

/// Projects, packages, classes and per-class imports of one run.
#[derive(Debug, Default, Clone)]
pub struct EntityCatalog {
    packages_per_project: BTreeMap<String, BTreeSet<String>>,
    classes_per_package: BTreeMap<String, BTreeSet<String>>,
    class_to_package: BTreeMap<String, String>,
    imports_per_class: BTreeMap<String, BTreeSet<String>>,
}

impl EntityCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a class to a package and list it as a member of that package.
    pub fn register_class(&mut self, qualified_name: &str, package_name: &str) {
        self.classes_per_package
            .entry(package_name.to_string())
            .or_default()
            .insert(qualified_name.to_string());

        let previous = self
            .class_to_package
            .insert(qualified_name.to_string(), package_name.to_string());
        if let Some(previous) = previous.filter(|p| p != package_name) {
            debug!(
                class = qualified_name,
                previous_package = %previous,
                package = package_name,
                "Class re-registered under a different package, rebinding"
            );
        }
    }

    /// Record that a project contains a package.
    pub fn register_project_package(&mut self, project: &str, package_name: &str) {
        self.packages_per_project
            .entry(project.to_string())
            .or_default()
            .insert(package_name.to_string());
    }

    /// Add import declarations to a class's import table.
    pub fn record_imports<I, S>(&mut self, qualified_name: &str, imports: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = self
            .imports_per_class
            .entry(qualified_name.to_string())
            .or_default();
        table.extend(imports.into_iter().map(Into::into));
    }

    /// The package a class is currently bound to.
    #[must_use]
    pub fn lookup_package(&self, qualified_name: &str) -> Option<&str> {
        self.class_to_package.get(qualified_name).map(String::as_str)
    }

    /// Every known class whose last dot-separated segment equals `simple_name`.
    ///
    /// `FooBar` does not match `Bar`; `a.b.Bar` and a default-package `Bar` do.
    /// Classes listed under several packages are reported once.
    #[must_use]
    pub fn classes_ending_with(&self, simple_name: &str) -> BTreeSet<&str> {
        self.classes_per_package
            .values()
            .flatten()
            .filter(|class| simple_name_of(class) == simple_name)
            .map(String::as_str)
            .collect()
    }

    /// Import table of a class; empty for unknown classes.
    pub fn imports_of(&self, qualified_name: &str) -> impl Iterator<Item = &str> {
        self.imports_per_class
            .get(qualified_name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// All projects with at least one package, in name order.
    pub fn projects(&self) -> impl Iterator<Item = &str> {
        self.packages_per_project.keys().map(String::as_str)
    }

    /// Packages observed in a project.
    pub fn packages_of(&self, project: &str) -> impl Iterator<Item = &str> {
        self.packages_per_project
            .get(project)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// All packages with at least one class, in name order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.classes_per_package.keys().map(String::as_str)
    }

    /// Classes ever registered under a package.
    pub fn classes_in(&self, package_name: &str) -> impl Iterator<Item = &str> {
        self.classes_per_package
            .get(package_name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Number of distinct classes with a package binding.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_to_package.len()
    }

    /// Number of distinct packages with at least one class.
    #[must_use]
    pub fn package_count(&self) -> usize {
        self.classes_per_package.len()
    }
}

/// Last dot-separated segment of a qualified name.
fn simple_name_of(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}
