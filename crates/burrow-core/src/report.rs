//! Repository-wide accumulation of per-file facts.

use serde::Serialize;

use crate::config::{ArgToken, CallMap, FileFacts};

/// The terminal aggregate of a walk.
///
/// Imports and type declarations keep discovery order and duplicates. Calls are keyed by
/// call key; merging a file overwrites any earlier arguments for the same key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub imports: Vec<String>,
    pub type_declarations: Vec<String>,
    pub calls: CallMap,
    pub files_analyzed: usize,
}

impl AnalysisReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's facts into the running totals.
    pub fn merge(&mut self, facts: FileFacts) {
        self.imports.extend(facts.imports);
        self.type_declarations.extend(facts.type_declarations);
        for (key, args) in facts.calls {
            self.calls.insert(key, args);
        }
        self.files_analyzed += 1;
    }

    /// Merge a sequence of files in the order given.
    pub fn from_files(files: impl IntoIterator<Item = FileFacts>) -> Self {
        let mut report = Self::new();
        for facts in files {
            report.merge(facts);
        }
        report
    }

    pub fn arguments(&self, call_key: &str) -> Option<&[ArgToken]> {
        self.calls.get(call_key).map(|v| v.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.type_declarations.is_empty() && self.calls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(imports: &[&str], types: &[&str], calls: &[(&str, Vec<ArgToken>)]) -> FileFacts {
        FileFacts {
            imports: imports.iter().map(|s| s.to_string()).collect(),
            type_declarations: types.iter().map(|s| s.to_string()).collect(),
            calls: calls
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn imports_and_types_concatenate_with_duplicates() {
        let report = AnalysisReport::from_files([
            facts(&["fmt", "os"], &["Point"], &[]),
            facts(&["fmt"], &["Point", "Line"], &[]),
        ]);
        assert_eq!(report.imports, vec!["fmt", "os", "fmt"]);
        assert_eq!(report.type_declarations, vec!["Point", "Point", "Line"]);
        assert_eq!(report.files_analyzed, 2);
    }

    #[test]
    fn later_file_wins_call_key() {
        let a = facts(&[], &[], &[("k", vec![ArgToken::literal("1")])]);
        let b = facts(&[], &[], &[("k", vec![ArgToken::variable("y")])]);

        let ab = AnalysisReport::from_files([a.clone(), b.clone()]);
        assert_eq!(ab.arguments("k"), Some(&[ArgToken::variable("y")][..]));

        let ba = AnalysisReport::from_files([b, a]);
        assert_eq!(ba.arguments("k"), Some(&[ArgToken::literal("1")][..]));
    }

    #[test]
    fn disjoint_keys_accumulate() {
        let report = AnalysisReport::from_files([
            facts(&[], &[], &[("Run", vec![])]),
            facts(&[], &[], &[("fmt.Println", vec![ArgToken::literal("\"hi\"")])]),
        ]);
        assert_eq!(report.calls.len(), 2);
        assert_eq!(report.arguments("Run"), Some(&[][..]));
    }

    #[test]
    fn later_empty_argument_list_still_overwrites() {
        let report = AnalysisReport::from_files([
            facts(&[], &[], &[("Run", vec![ArgToken::literal("1")])]),
            facts(&[], &[], &[("Run", vec![])]),
        ]);
        assert_eq!(report.arguments("Run"), Some(&[][..]));
    }

    #[test]
    fn empty_report() {
        let report = AnalysisReport::new();
        assert!(report.is_empty());
        assert_eq!(report.files_analyzed, 0);
        assert_eq!(report.arguments("Run"), None);
    }
}
