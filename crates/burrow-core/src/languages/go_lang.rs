//! Go language analyser.

use tree_sitter::{Language, Node, Tree};

use super::{first_error_node, LanguageAnalyser};
use crate::config::{ArgToken, CallMap};
use crate::error::ParseFailure;

/// Syntactic shape of an expression node, as far as extraction cares.
#[derive(Debug, Clone, Copy)]
pub enum ExprShape<'t> {
    Literal,
    Identifier,
    /// `qualifier.name` with a bare-identifier qualifier.
    Selector { qualifier: Node<'t>, name: Node<'t> },
    Call,
    Other,
}

impl<'t> ExprShape<'t> {
    pub fn of(node: Node<'t>) -> Self {
        match node.kind() {
            "int_literal" | "float_literal" | "imaginary_literal" | "rune_literal"
            | "interpreted_string_literal" | "raw_string_literal" | "true" | "false" | "nil" => {
                Self::Literal
            }
            "identifier" | "type_identifier" | "iota" => Self::Identifier,
            "selector_expression" => {
                match (
                    node.child_by_field_name("operand"),
                    node.child_by_field_name("field"),
                ) {
                    (Some(qualifier), Some(name)) if qualifier.kind() == "identifier" => {
                        Self::Selector { qualifier, name }
                    }
                    _ => Self::Other,
                }
            }
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(qualifier), Some(name)) => Self::Selector { qualifier, name },
                _ => Self::Other,
            },
            // `[]byte(s)` and friends are calls in Go's own AST
            "call_expression" | "type_conversion_expression" => Self::Call,
            _ => Self::Other,
        }
    }
}

pub struct GoAnalyser;

impl Default for GoAnalyser {
    fn default() -> Self {
        Self
    }
}

impl GoAnalyser {
    pub fn new() -> Self {
        Self
    }

    fn text<'s>(node: &Node, source: &'s [u8]) -> &'s str {
        node.utf8_text(source).unwrap_or("")
    }

    /// Key a call by its callee: `name` or `qualifier.name`.
    ///
    /// Parenthesised callees, generic instantiations, call results and deeper
    /// selector chains have no key.
    pub fn call_key(node: &Node, source: &[u8]) -> Option<String> {
        if node.child_by_field_name("type_arguments").is_some() {
            return None;
        }
        let callee = node.child_by_field_name("function")?;
        match ExprShape::of(callee) {
            ExprShape::Identifier => Some(Self::text(&callee, source).to_string()),
            ExprShape::Selector { qualifier, name } => Some(format!(
                "{}.{}",
                Self::text(&qualifier, source),
                Self::text(&name, source)
            )),
            ExprShape::Literal | ExprShape::Call | ExprShape::Other => None,
        }
    }

    /// Map one argument expression to its token. Total: every node yields a token.
    pub fn normalize_argument(node: &Node, source: &[u8]) -> ArgToken {
        match ExprShape::of(*node) {
            ExprShape::Literal => ArgToken::literal(Self::text(node, source)),
            ExprShape::Identifier => ArgToken::variable(Self::text(node, source)),
            ExprShape::Selector { qualifier, name } => {
                ArgToken::qualified(Self::text(&qualifier, source), Self::text(&name, source))
            }
            ExprShape::Call => ArgToken::NestedCall,
            ExprShape::Other => ArgToken::Unsupported,
        }
    }

    /// Normalized arguments of a call, left to right.
    pub fn call_arguments(node: &Node, source: &[u8]) -> Vec<ArgToken> {
        let args = match node.child_by_field_name("arguments") {
            Some(a) => a,
            None => return Vec::new(),
        };
        let mut cursor = args.walk();
        args.named_children(&mut cursor)
            .filter(|arg| arg.kind() != "comment")
            .map(|arg| {
                // `xs...` is recorded as its operand
                if arg.kind() == "variadic_argument" {
                    if let Some(inner) = arg.named_child(0) {
                        return Self::normalize_argument(&inner, source);
                    }
                }
                Self::normalize_argument(&arg, source)
            })
            .collect()
    }

    fn import_path(spec: &Node, source: &[u8]) -> Option<String> {
        let path = spec.child_by_field_name("path")?;
        Some(strip_delimiters(Self::text(&path, source)).to_string())
    }

    fn find_structs(node: &Node, source: &[u8], structs: &mut Vec<String>) {
        if node.kind() == "type_spec" {
            if let (Some(name), Some(ty)) = (
                node.child_by_field_name("name"),
                node.child_by_field_name("type"),
            ) {
                if ty.kind() == "struct_type" {
                    structs.push(Self::text(&name, source).to_string());
                }
            }
        }
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                Self::find_structs(&child, source, structs);
            }
        }
    }

    fn find_calls(node: &Node, source: &[u8], calls: &mut CallMap) {
        if node.kind() == "call_expression" {
            if let Some(key) = Self::call_key(node, source) {
                calls.insert(key, Self::call_arguments(node, source));
            }
        }
        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                Self::find_calls(&child, source, calls);
            }
        }
    }
}

/// Strip one matching pair of `"` or `` ` `` delimiters.
pub fn strip_delimiters(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'`') {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

impl LanguageAnalyser for GoAnalyser {
    fn extensions(&self) -> &[&str] {
        &["go"]
    }

    fn language_name(&self) -> &str {
        "Go"
    }

    fn get_language(&self) -> Language {
        tree_sitter_go::LANGUAGE.into()
    }

    fn syntax_error(&self, tree: &Tree) -> Option<ParseFailure> {
        let root = tree.root_node();
        if let Some(failure) = first_error_node(root) {
            return Some(failure);
        }
        let mut has_package = false;
        let mut seen_declaration = false;
        let mut cursor = root.walk();
        for child in root.named_children(&mut cursor) {
            match child.kind() {
                "package_clause" => has_package = true,
                "comment" => {}
                "import_declaration" if seen_declaration => {
                    return Some(ParseFailure::at(
                        &child,
                        "imports must appear before other declarations",
                    ));
                }
                "import_declaration" => {}
                _ => seen_declaration = true,
            }
        }
        if has_package {
            None
        } else {
            Some(ParseFailure::new(1, 1, "expected 'package' clause"))
        }
    }

    fn extract_imports(&self, tree: &Tree, source: &[u8]) -> Vec<String> {
        let mut imports = Vec::new();
        let root = tree.root_node();

        for i in 0..root.child_count() {
            let decl = match root.child(i) {
                Some(c) if c.kind() == "import_declaration" => c,
                _ => continue,
            };
            for j in 0..decl.child_count() {
                let Some(spec) = decl.child(j) else { continue };
                match spec.kind() {
                    "import_spec" => imports.extend(Self::import_path(&spec, source)),
                    "import_spec_list" => {
                        for k in 0..spec.child_count() {
                            if let Some(sub) = spec.child(k) {
                                if sub.kind() == "import_spec" {
                                    imports.extend(Self::import_path(&sub, source));
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        imports
    }

    fn extract_type_declarations(&self, tree: &Tree, source: &[u8]) -> Vec<String> {
        let mut structs = Vec::new();
        Self::find_structs(&tree.root_node(), source, &mut structs);
        structs
    }

    fn extract_calls(&self, tree: &Tree, source: &[u8]) -> CallMap {
        let mut calls = CallMap::new();
        Self::find_calls(&tree.root_node(), source, &mut calls);
        calls
    }
}
