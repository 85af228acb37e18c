//! Shared tree-sitter utilities for language support modules.
//!
//! Provides common functions for extracting text and positions from tree-sitter nodes.

// Tree-sitter returns usize for positions, but we store u32 for compactness.
// This is safe for practical source files (no file has 4 billion lines).
#![allow(clippy::cast_possible_truncation)]

/// Get text content of a tree-sitter node.
///
/// Returns `None` if the node's byte range contains invalid UTF-8.
pub fn node_text(node: &tree_sitter::Node, content: &[u8]) -> Option<String> {
    match std::str::from_utf8(&content[node.byte_range()]) {
        Ok(s) => Some(s.to_string()),
        Err(e) => {
            tracing::trace!(
                byte_range = ?node.byte_range(),
                error = %e,
                node_kind = %node.kind(),
                "Failed to decode node text as UTF-8"
            );
            None
        }
    }
}

/// 1-indexed line of the node's start.
pub fn node_line(node: &tree_sitter::Node) -> u32 {
    node.start_position().row as u32 + 1
}

/// Position (1-indexed line, 1-indexed column) of the first syntax error in a tree.
///
/// Returns `None` for error-free trees.
pub fn first_error_position(tree: &tree_sitter::Tree) -> Option<(u32, u32)> {
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }
    let mut node = root;
    // Descend along the leftmost child that contains an error.
    loop {
        if node.is_error() || node.is_missing() {
            break;
        }
        let mut cursor = node.walk();
        let next = node
            .children(&mut cursor)
            .find(|child| child.has_error() || child.is_missing());
        match next {
            Some(child) => node = child,
            None => break,
        }
    }
    let position = node.start_position();
    Some((position.row as u32 + 1, position.column as u32 + 1))
}
