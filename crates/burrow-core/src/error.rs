//! Error taxonomy for an inspection run.

use std::path::PathBuf;

/// Coarse classification of an [`InspectError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The root path is unusable; nothing was traversed.
    Configuration,
    /// A selected source file failed to parse.
    Parse,
    /// The directory walk or a file read failed.
    Traversal,
    /// The finished report could not be written.
    Output,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Parse => "parse",
            Self::Traversal => "traversal",
            Self::Output => "output",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single file's syntax tree was rejected.
///
/// Line and column are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseFailure {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ParseFailure {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }

    /// Build a failure positioned at a tree-sitter node.
    pub fn at(node: &tree_sitter::Node, message: impl Into<String>) -> Self {
        let pos = node.start_position();
        Self::new(pos.row + 1, pos.column + 1, message)
    }
}

/// Terminal outcome of a failed run. Nothing is recovered or retried.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("path {path} does not exist")]
    NotFound { path: PathBuf },

    #[error("path {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("cannot access {path}: {source}")]
    InaccessibleRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error analyzing {path}: {failure}")]
    Parse {
        path: PathBuf,
        #[source]
        failure: ParseFailure,
    },

    /// Every failure gathered under [`crate::config::FailurePolicy::CollectAll`].
    #[error("{} files failed to parse: {}", .0.len(), summarize(.0))]
    ParseFailures(Vec<(PathBuf, ParseFailure)>),

    #[error("error walking directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl InspectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } | Self::NotADirectory { .. } | Self::InaccessibleRoot { .. } => {
                ErrorKind::Configuration
            }
            Self::Parse { .. } | Self::ParseFailures(_) => ErrorKind::Parse,
            Self::Walk(_) | Self::Read { .. } => ErrorKind::Traversal,
            Self::Output { .. } => ErrorKind::Output,
        }
    }

    /// Paths of every file that failed to parse, in traversal order.
    pub fn failed_paths(&self) -> Vec<&PathBuf> {
        match self {
            Self::Parse { path, .. } => vec![path],
            Self::ParseFailures(all) => all.iter().map(|(p, _)| p).collect(),
            _ => Vec::new(),
        }
    }
}

fn summarize(failures: &[(PathBuf, ParseFailure)]) -> String {
    failures
        .iter()
        .map(|(path, failure)| format!("{}:{}", path.display(), failure))
        .collect::<Vec<_>>()
        .join("; ")
}
