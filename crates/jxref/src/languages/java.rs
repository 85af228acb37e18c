//! Java language support for jxref.
//!
//! Turns a tree-sitter-java syntax tree into a `CompilationUnit`. Every method
//! invocation and field access inside a top-level type becomes a usage site.
//! Sites are resolved eagerly when the unit alone names the declaring type:
//!
//! 1. the scope is a type declared in this unit (`Inner.build()`)
//! 2. the scope is the simple name of a single-type import (`Strings.join(..)`
//!    with `import org.acme.util.Strings;`)
//! 3. the scope is a qualified type name (`org.acme.util.Strings.join(..)`)
//!
//! Everything else is left unresolved together with the shape of its scope.
//!
//! Comments anywhere in the file are kept verbatim.

use std::collections::BTreeMap;
use std::path::Path;

use super::tree_sitter_utils::{node_line, node_text};
use super::LanguageSupport;
use crate::types::{
    CompilationUnit, DeclaredType, ResolvedTarget, ScopeShape, UsageKind, UsageSite,
};

/// Tree-sitter node kind constants for the Java grammar.
mod node_kinds {
    // Compilation unit header
    pub const PACKAGE_DECLARATION: &str = "package_declaration";
    pub const IMPORT_DECLARATION: &str = "import_declaration";
    pub const ASTERISK: &str = "asterisk";
    pub const STATIC: &str = "static";

    // Type declarations
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const INTERFACE_DECLARATION: &str = "interface_declaration";
    pub const ENUM_DECLARATION: &str = "enum_declaration";
    pub const RECORD_DECLARATION: &str = "record_declaration";
    pub const ANNOTATION_TYPE_DECLARATION: &str = "annotation_type_declaration";

    // Expressions
    pub const METHOD_INVOCATION: &str = "method_invocation";
    pub const FIELD_ACCESS: &str = "field_access";

    // Names
    pub const IDENTIFIER: &str = "identifier";
    pub const SCOPED_IDENTIFIER: &str = "scoped_identifier";

    // Comments
    pub const LINE_COMMENT: &str = "line_comment";
    pub const BLOCK_COMMENT: &str = "block_comment";
}

/// Java language support implementation.
pub struct JavaLanguage;

impl LanguageSupport for JavaLanguage {
    fn extensions(&self) -> &[&str] {
        &["java"]
    }

    fn tree_sitter_language(&self) -> tree_sitter::Language {
        tree_sitter_java::LANGUAGE.into()
    }

    fn extract_unit(
        &self,
        path: &Path,
        tree: &tree_sitter::Tree,
        content: &[u8],
    ) -> CompilationUnit {
        extract_unit(path, tree, content)
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Import {
    path: String,
    is_static: bool,
    is_glob: bool,
}

/// What the unit itself knows about type names.
struct UnitScope<'a> {
    package: Option<&'a str>,
    /// Simple name → qualified name of every type declared in the unit
    local_types: BTreeMap<String, String>,
    /// Simple name → qualified name of every single-type import
    single_type_imports: BTreeMap<&'a str, &'a str>,
}

impl UnitScope<'_> {
    fn resolve_bare(&self, name: &str) -> Option<ResolvedTarget> {
        if let (Some(package), Some(qualified)) = (self.package, self.local_types.get(name)) {
            return Some(ResolvedTarget::new(package, qualified.as_str()));
        }
        let import = self.single_type_imports.get(name)?;
        let segments: Vec<&str> = import.split('.').collect();
        resolve_qualified(&segments)
    }
}

/// Extract a compilation unit from a Java syntax tree.
pub fn extract_unit(path: &Path, tree: &tree_sitter::Tree, content: &[u8]) -> CompilationUnit {
    let root = tree.root_node();
    let package = extract_package(&root, content);
    let imports = extract_imports(&root, content);

    let mut local_types = BTreeMap::new();
    collect_local_types(&root, content, package.as_deref(), &mut local_types);

    let scope = UnitScope {
        package: package.as_deref(),
        local_types,
        single_type_imports: imports
            .iter()
            .filter(|import| !import.is_static && !import.is_glob)
            .map(|import| (simple_name(&import.path), import.path.as_str()))
            .collect(),
    };

    let mut types = Vec::new();
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if !is_type_declaration(child.kind()) {
            continue;
        }
        let Some(name) = declared_name(&child, content) else {
            continue;
        };
        let mut usages = Vec::new();
        collect_usages(&child, content, &scope, &mut usages);
        types.push(DeclaredType::new(qualify(package.as_deref(), &name), usages));
    }

    let mut comments = Vec::new();
    collect_comments(&root, content, &mut comments);

    CompilationUnit {
        path: path.to_path_buf(),
        package,
        imports: imports.into_iter().map(|import| import.path).collect(),
        types,
        comments,
    }
}

fn collect_comments(node: &tree_sitter::Node, content: &[u8], comments: &mut Vec<String>) {
    use node_kinds::{BLOCK_COMMENT, LINE_COMMENT};

    if matches!(node.kind(), LINE_COMMENT | BLOCK_COMMENT) {
        if let Some(text) = node_text(node, content) {
            comments.push(text.trim_end().to_string());
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_comments(&child, content, comments);
    }
}

fn extract_package(root: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    use node_kinds::{IDENTIFIER, PACKAGE_DECLARATION, SCOPED_IDENTIFIER};

    let mut cursor = root.walk();
    let declaration = root
        .children(&mut cursor)
        .find(|child| child.kind() == PACKAGE_DECLARATION)?;

    let mut inner = declaration.walk();
    let name = declaration
        .children(&mut inner)
        .find(|child| matches!(child.kind(), IDENTIFIER | SCOPED_IDENTIFIER))?;
    node_text(&name, content).map(|text| strip_whitespace(&text))
}

fn extract_imports(root: &tree_sitter::Node, content: &[u8]) -> Vec<Import> {
    use node_kinds::{ASTERISK, IDENTIFIER, IMPORT_DECLARATION, SCOPED_IDENTIFIER, STATIC};

    let mut imports = Vec::new();
    let mut cursor = root.walk();
    for declaration in root.children(&mut cursor) {
        if declaration.kind() != IMPORT_DECLARATION {
            continue;
        }
        let mut path = None;
        let mut is_static = false;
        let mut is_glob = false;

        let mut inner = declaration.walk();
        for child in declaration.children(&mut inner) {
            match child.kind() {
                STATIC => is_static = true,
                ASTERISK => is_glob = true,
                IDENTIFIER | SCOPED_IDENTIFIER => {
                    path = node_text(&child, content).map(|text| strip_whitespace(&text));
                }
                _ => {}
            }
        }

        if let Some(path) = path {
            imports.push(Import {
                path,
                is_static,
                is_glob,
            });
        }
    }
    imports
}

/// Register every type declared anywhere in `node`, nested ones under their
/// enclosing type (`pkg.Outer.Inner`). The first declaration of a simple name wins.
fn collect_local_types(
    node: &tree_sitter::Node,
    content: &[u8],
    enclosing: Option<&str>,
    types: &mut BTreeMap<String, String>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        let name = if is_type_declaration(child.kind()) {
            declared_name(&child, content)
        } else {
            None
        };
        match name {
            Some(name) => {
                let qualified = qualify(enclosing, &name);
                types.entry(name).or_insert_with(|| qualified.clone());
                collect_local_types(&child, content, Some(&qualified), types);
            }
            None => collect_local_types(&child, content, enclosing, types),
        }
    }
}

fn collect_usages(
    node: &tree_sitter::Node,
    content: &[u8],
    scope: &UnitScope<'_>,
    usages: &mut Vec<UsageSite>,
) {
    use node_kinds::{FIELD_ACCESS, METHOD_INVOCATION};

    let kind = match node.kind() {
        METHOD_INVOCATION => Some(UsageKind::Call),
        FIELD_ACCESS => Some(UsageKind::FieldAccess),
        _ => None,
    };

    let mut skip_object = false;
    if let Some(kind) = kind {
        let object = node.child_by_field_name("object");
        let line = node_line(node);
        let site = match object {
            None => UsageSite::unresolved(kind, ScopeShape::Absent, line),
            Some(object) => {
                let (site, qualified_name) = classify_object(&object, content, scope, kind, line);
                // A qualified type name is one reference, not a chain of field accesses.
                skip_object = qualified_name;
                site
            }
        };
        usages.push(site);
    }

    let object_id = if skip_object {
        node.child_by_field_name("object").map(|object| object.id())
    } else {
        None
    };
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if Some(child.id()) == object_id {
            continue;
        }
        collect_usages(&child, content, scope, usages);
    }
}

/// Build the usage site for a scoped access. The flag reports whether the
/// scope was consumed as a qualified type name.
fn classify_object(
    object: &tree_sitter::Node,
    content: &[u8],
    scope: &UnitScope<'_>,
    kind: UsageKind,
    line: u32,
) -> (UsageSite, bool) {
    use node_kinds::IDENTIFIER;

    if object.kind() == IDENTIFIER {
        let Some(name) = node_text(object, content) else {
            return (UsageSite::unresolved(kind, ScopeShape::Compound, line), false);
        };
        let site = match scope.resolve_bare(&name) {
            Some(target) => UsageSite::resolved(kind, target, line),
            None => UsageSite::unresolved(kind, ScopeShape::BareIdentifier(name), line),
        };
        return (site, false);
    }

    if let Some(segments) = identifier_chain(object, content) {
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();
        if let Some(target) = resolve_qualified_scope(&segments) {
            return (UsageSite::resolved(kind, target, line), true);
        }
    }
    (UsageSite::unresolved(kind, ScopeShape::Compound, line), false)
}

/// Segments of a dotted name made only of identifiers (`a.b.C`).
fn identifier_chain(node: &tree_sitter::Node, content: &[u8]) -> Option<Vec<String>> {
    use node_kinds::{FIELD_ACCESS, IDENTIFIER, SCOPED_IDENTIFIER};

    match node.kind() {
        IDENTIFIER => Some(vec![node_text(node, content)?]),
        FIELD_ACCESS => {
            let mut chain = identifier_chain(&node.child_by_field_name("object")?, content)?;
            let field = node.child_by_field_name("field")?;
            if field.kind() != IDENTIFIER {
                return None;
            }
            chain.push(node_text(&field, content)?);
            Some(chain)
        }
        SCOPED_IDENTIFIER => {
            let mut chain = identifier_chain(&node.child_by_field_name("scope")?, content)?;
            chain.push(node_text(&node.child_by_field_name("name")?, content)?);
            Some(chain)
        }
        _ => None,
    }
}

/// Split a qualified name at its first capitalized segment: the segments
/// before it are the package, the segments up to it the type.
///
/// Requires at least one package segment.
fn resolve_qualified(segments: &[&str]) -> Option<ResolvedTarget> {
    let type_index = segments.iter().position(|segment| starts_uppercase(segment))?;
    if type_index == 0 {
        return None;
    }
    Some(ResolvedTarget::new(
        segments[..type_index].join("."),
        segments[..=type_index].join("."),
    ))
}

/// Like `resolve_qualified`, for dotted expressions that may as well be a
/// variable followed by fields (`config.DEFAULT.apply()`). The package part
/// must be all lowercase and the type must not be spelled like a constant.
fn resolve_qualified_scope(segments: &[&str]) -> Option<ResolvedTarget> {
    let type_index = segments.iter().position(|segment| starts_uppercase(segment))?;
    let package_like = segments[..type_index]
        .iter()
        .all(|segment| !segment.chars().any(char::is_uppercase));
    if !package_like || is_constant_name(segments[type_index]) {
        return None;
    }
    resolve_qualified(segments)
}

fn is_type_declaration(kind: &str) -> bool {
    use node_kinds::{
        ANNOTATION_TYPE_DECLARATION, CLASS_DECLARATION, ENUM_DECLARATION, INTERFACE_DECLARATION,
        RECORD_DECLARATION,
    };

    matches!(
        kind,
        CLASS_DECLARATION
            | INTERFACE_DECLARATION
            | ENUM_DECLARATION
            | RECORD_DECLARATION
            | ANNOTATION_TYPE_DECLARATION
    )
}

fn declared_name(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    node_text(&node.child_by_field_name("name")?, content)
}

fn qualify(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}

fn simple_name(qualified: &str) -> &str {
    qualified.rsplit_once('.').map_or(qualified, |(_, name)| name)
}

fn starts_uppercase(segment: &str) -> bool {
    segment.chars().next().is_some_and(char::is_uppercase)
}

/// `MAX_SIZE`, `DEFAULT`: more than one character, no lowercase letter.
fn is_constant_name(segment: &str) -> bool {
    segment.chars().nth(1).is_some() && !segment.chars().any(char::is_lowercase)
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
