//! Core data types and configuration for a Burrow run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

/// Prefix that marks an argument token as a variable reference.
pub const VARIABLE_SENTINEL: char = '$';

/// Token recorded for an argument that is itself a call.
pub const NESTED_CALL_TOKEN: &str = "<call>";

/// Token recorded for any argument shape without a dedicated rule.
pub const UNSUPPORTED_TOKEN: &str = "<unsupported>";

/// One normalized call argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgToken {
    /// Literal source text, quotes included (`"hi"`, `42`, `true`).
    Literal(String),
    /// A bare identifier.
    Variable(String),
    /// `qualifier.name` where the qualifier is a bare identifier.
    Qualified { qualifier: String, name: String },
    NestedCall,
    Unsupported,
}

impl ArgToken {
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    pub fn qualified(qualifier: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            qualifier: qualifier.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for ArgToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Variable(name) => write!(f, "{VARIABLE_SENTINEL}{name}"),
            Self::Qualified { qualifier, name } => write!(f, "{qualifier}.{name}"),
            Self::NestedCall => f.write_str(NESTED_CALL_TOKEN),
            Self::Unsupported => f.write_str(UNSUPPORTED_TOKEN),
        }
    }
}

impl Serialize for ArgToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Call key → argument tokens. Inserting an existing key replaces its arguments.
pub type CallMap = BTreeMap<String, Vec<ArgToken>>;

/// Facts extracted from a single source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileFacts {
    pub imports: Vec<String>,
    pub type_declarations: Vec<String>,
    pub calls: CallMap,
}

/// How the report is rendered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    pub fn from_str_value(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the aggregator does when a file fails to parse.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failure.
    #[default]
    AbortOnFirst,
    /// Keep parsing to gather every failure, then abort with all of them.
    CollectAll,
}

/// Configuration for an inspection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectConfig {
    #[serde(default)]
    pub repo_path: String,
    pub output_path: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            repo_path: String::new(),
            output_path: None,
            format: OutputFormat::default(),
            exclude_patterns: Vec::new(),
            follow_links: false,
            failure_policy: FailurePolicy::default(),
            verbose: false,
            quiet: false,
        }
    }
}

impl InspectConfig {
    /// Config rooted at `path` with every other setting at its default.
    pub fn for_path(path: impl AsRef<std::path::Path>) -> Self {
        Self {
            repo_path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        }
    }
}
