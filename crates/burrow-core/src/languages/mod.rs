//! Language analyser trait and registry.

use std::collections::HashMap;

use tree_sitter::{Language, Node, Tree};

use crate::config::CallMap;
use crate::error::ParseFailure;

pub mod go_lang;

/// Trait that all language analysers implement.
///
/// Extraction methods assume a tree that passed [`LanguageAnalyser::syntax_error`];
/// they never fail.
pub trait LanguageAnalyser: Send + Sync {
    /// File extensions this analyser handles (e.g. &["go"]).
    fn extensions(&self) -> &[&str];

    /// Human-readable language name (e.g. "Go").
    fn language_name(&self) -> &str;

    /// Get the tree-sitter Language for parsing.
    fn get_language(&self) -> Language;

    /// First reason this tree is not a valid source file, if any.
    fn syntax_error(&self, tree: &Tree) -> Option<ParseFailure> {
        first_error_node(tree.root_node())
    }

    /// Import paths in declaration order, delimiters stripped.
    fn extract_imports(&self, tree: &Tree, source: &[u8]) -> Vec<String>;

    /// Names of structural (record) type declarations in pre-order.
    fn extract_type_declarations(&self, tree: &Tree, source: &[u8]) -> Vec<String>;

    /// Call key → normalized arguments; a repeated key keeps its last occurrence.
    fn extract_calls(&self, tree: &Tree, source: &[u8]) -> CallMap;
}

/// Pre-order search for the first ERROR or MISSING node.
pub fn first_error_node(node: Node) -> Option<ParseFailure> {
    if !node.has_error() {
        return None;
    }
    if node.is_missing() {
        return Some(ParseFailure::at(&node, format!("missing {}", node.kind())));
    }
    if node.is_error() {
        return Some(ParseFailure::at(&node, "syntax error"));
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            if let Some(failure) = first_error_node(child) {
                return Some(failure);
            }
        }
    }
    // has_error() was set but no offending child was found
    Some(ParseFailure::at(&node, "syntax error"))
}

/// Registry mapping file extensions to analysers.
pub struct AnalyserRegistry {
    analysers: Vec<Box<dyn LanguageAnalyser>>,
    extension_map: HashMap<String, usize>,
}

impl AnalyserRegistry {
    /// Build the registry with all available language analysers.
    pub fn new() -> Self {
        let analysers: Vec<Box<dyn LanguageAnalyser>> = vec![Box::new(go_lang::GoAnalyser::new())];

        let mut extension_map = HashMap::new();
        for (i, analyser) in analysers.iter().enumerate() {
            for ext in analyser.extensions() {
                extension_map.insert(ext.to_string(), i);
            }
        }

        Self {
            analysers,
            extension_map,
        }
    }

    /// Get the analyser for a given file extension, if one exists.
    pub fn get_by_extension(&self, ext: &str) -> Option<&dyn LanguageAnalyser> {
        self.extension_map
            .get(ext)
            .map(|&i| self.analysers[i].as_ref())
    }

    /// Get the analyser for a path by its extension.
    pub fn get_for_path(&self, path: &std::path::Path) -> Option<&dyn LanguageAnalyser> {
        let ext = path.extension()?.to_string_lossy();
        self.get_by_extension(&ext)
    }
}

impl Default for AnalyserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn go_registered_by_extension() {
        let registry = AnalyserRegistry::new();
        let analyser = registry.get_by_extension("go").unwrap();
        assert_eq!(analyser.language_name(), "Go");
    }

    #[test]
    fn unknown_extensions_ignored() {
        let registry = AnalyserRegistry::new();
        assert!(registry.get_by_extension("rs").is_none());
        assert!(registry.get_for_path(Path::new("README")).is_none());
        assert!(registry.get_for_path(Path::new("notes.go.txt")).is_none());
        assert!(registry.get_for_path(Path::new("pkg/main.go")).is_some());
    }
}
