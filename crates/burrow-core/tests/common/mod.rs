//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use burrow_core::config::{ArgToken, FileFacts, InspectConfig};
use burrow_core::error::InspectError;
use burrow_core::languages::go_lang::GoAnalyser;
use burrow_core::phases::extraction::extract_facts;
use burrow_core::phases::parsing::parse_source;
use burrow_core::pipeline::run_pipeline;
use burrow_core::report::AnalysisReport;

// ---------------------------------------------------------------------------
// Fixture path resolution
// ---------------------------------------------------------------------------

/// Resolve `tests/fixtures/{name}` relative to the workspace root.
pub fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    Path::new(manifest_dir)
        .join("../../tests/fixtures")
        .join(name)
        .canonicalize()
        .unwrap_or_else(|_| {
            Path::new(manifest_dir)
                .join("../../tests/fixtures")
                .join(name)
        })
}

/// Write `(relative path, contents)` pairs under `root`, creating directories.
pub fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Runners
// ---------------------------------------------------------------------------

/// Parse and extract a single in-memory Go file.
pub fn facts_of(source: &str) -> FileFacts {
    let analyser = GoAnalyser::new();
    let parsed = parse_source(&analyser, "test.go", source.as_bytes().to_vec())
        .unwrap_or_else(|f| panic!("fixture failed to parse: {f}"));
    extract_facts(&analyser, &parsed)
}

/// Wrap statements in a function body of a minimal file and extract.
pub fn facts_of_body(body: &str) -> FileFacts {
    facts_of(&format!("package p\n\nfunc f() {{\n{body}\n}}\n"))
}

/// Run the whole pipeline over a directory with default settings.
pub fn analyse(path: &Path) -> Result<AnalysisReport, InspectError> {
    run_pipeline(&InspectConfig::for_path(path), None)
}

/// Run the whole pipeline over a fixture directory.
pub fn analyse_fixture(name: &str) -> AnalysisReport {
    analyse(&fixture_path(name)).unwrap()
}

// ---------------------------------------------------------------------------
// Token helpers
// ---------------------------------------------------------------------------

/// Arguments recorded for `key`, rendered as strings.
pub fn arg_strings(calls: &burrow_core::config::CallMap, key: &str) -> Option<Vec<String>> {
    calls
        .get(key)
        .map(|args| args.iter().map(ArgToken::to_string).collect())
}

/// Tokens of the only argument of the only call in `body`.
pub fn single_arg(body: &str) -> ArgToken {
    let facts = facts_of_body(body);
    assert_eq!(facts.calls.len(), 1, "expected one call key in {body:?}");
    let args = facts.calls.values().next().unwrap();
    assert_eq!(args.len(), 1, "expected one argument in {body:?}");
    args[0].clone()
}
