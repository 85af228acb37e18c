//! Language-specific compilation unit extraction.
//!
//! Each supported language implements the `LanguageSupport` trait, which defines
//! how a tree-sitter syntax tree becomes a `CompilationUnit`: declared package,
//! imports, declared types and their usage sites with eager resolution applied.
//!
//! ## Adding a New Language
//!
//! 1. Add the variant to `Language` enum in `types.rs`
//! 2. Create a new module (e.g., `kotlin.rs`)
//! 3. Implement `LanguageSupport` trait
//! 4. Register in `get_language_support()`

pub mod java;
pub(crate) mod tree_sitter_utils;

use std::path::Path;

use crate::types::{CompilationUnit, Language};

/// Get the language support implementation for a language.
#[must_use]
pub fn get_language_support(lang: Language) -> &'static dyn LanguageSupport {
    match lang {
        Language::Java => &java::JavaLanguage,
    }
}

/// Trait for language-specific extraction.
pub trait LanguageSupport: Send + Sync {
    /// File extensions this language handles.
    fn extensions(&self) -> &[&str];

    /// Get the tree-sitter language for parsing.
    fn tree_sitter_language(&self) -> tree_sitter::Language;

    /// Turn a syntax tree into a compilation unit.
    ///
    /// `content` must be the exact bytes the tree was parsed from.
    fn extract_unit(&self, path: &Path, tree: &tree_sitter::Tree, content: &[u8])
        -> CompilationUnit;
}
