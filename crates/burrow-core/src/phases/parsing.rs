//! Syntax tree provider: read a source file and parse it with tree-sitter.

use std::path::{Path, PathBuf};

use tree_sitter::{Parser, Tree};

use crate::error::{InspectError, ParseFailure};
use crate::languages::LanguageAnalyser;

/// A successfully parsed source file. Lives for one analysis pass.
pub struct ParsedFile {
    pub path: PathBuf,
    pub source: Vec<u8>,
    pub tree: Tree,
}

impl std::fmt::Debug for ParsedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedFile")
            .field("path", &self.path)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Parse in-memory source. The tree is rejected if the analyser finds a syntax error.
pub fn parse_source(
    analyser: &dyn LanguageAnalyser,
    path: impl Into<PathBuf>,
    source: Vec<u8>,
) -> Result<ParsedFile, ParseFailure> {
    check_utf8(&source)?;

    let mut parser = Parser::new();
    parser
        .set_language(&analyser.get_language())
        .map_err(|e| ParseFailure::new(1, 1, format!("grammar rejected: {e}")))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| ParseFailure::new(1, 1, "parser produced no tree"))?;

    if let Some(failure) = analyser.syntax_error(&tree) {
        return Err(failure);
    }

    Ok(ParsedFile {
        path: path.into(),
        source,
        tree,
    })
}

/// Source must be UTF-8; the failure points at the first bad byte.
fn check_utf8(source: &[u8]) -> Result<(), ParseFailure> {
    let err = match std::str::from_utf8(source) {
        Ok(_) => return Ok(()),
        Err(e) => e,
    };
    let valid = &source[..err.valid_up_to()];
    let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = valid
        .iter()
        .rposition(|&b| b == b'\n')
        .map(|i| i + 1)
        .unwrap_or(0);
    Err(ParseFailure::new(
        line,
        valid.len() - line_start + 1,
        "illegal UTF-8 encoding",
    ))
}

/// Read and parse one file.
pub fn parse_file(analyser: &dyn LanguageAnalyser, path: &Path) -> Result<ParsedFile, InspectError> {
    let source = std::fs::read(path).map_err(|source| InspectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(analyser, path, source).map_err(|failure| InspectError::Parse {
        path: path.to_path_buf(),
        failure,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::languages::go_lang::GoAnalyser;

    #[test]
    fn valid_source_parses() {
        let parsed = parse_source(
            &GoAnalyser::new(),
            "main.go",
            b"package main\n\nfunc main() {}\n".to_vec(),
        )
        .unwrap();
        assert_eq!(parsed.path, PathBuf::from("main.go"));
        assert_eq!(parsed.tree.root_node().kind(), "source_file");
    }

    #[test]
    fn unbalanced_braces_rejected() {
        let err = parse_source(
            &GoAnalyser::new(),
            "bad.go",
            b"package main\n\nfunc main() {\n\tfmt.Println(\"x\"\n".to_vec(),
        )
        .unwrap_err();
        assert!(err.line >= 1);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn invalid_utf8_rejected_at_offending_byte() {
        let err = parse_source(
            &GoAnalyser::new(),
            "bad.go",
            b"package p\n\nimport \"f\xffo\"\n".to_vec(),
        )
        .unwrap_err();
        assert_eq!(err, ParseFailure::new(3, 10, "illegal UTF-8 encoding"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_file(&GoAnalyser::new(), &dir.path().join("gone.go")).unwrap_err();
        assert!(matches!(err, InspectError::Read { .. }));
    }

    #[test]
    fn parse_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.go");
        std::fs::write(&path, "package broken\n\nfunc {\n").unwrap();
        match parse_file(&GoAnalyser::new(), &path).unwrap_err() {
            InspectError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
