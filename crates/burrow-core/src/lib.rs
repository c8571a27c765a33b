//! Burrow Core — Static extraction engine for Go source trees.
//!
//! This crate contains all analysis logic: directory discovery, tree-sitter parsing,
//! per-file fact extraction (imports, struct types, call sites), and the repository-wide
//! merge that produces an [`report::AnalysisReport`].

pub mod config;
pub mod error;
pub mod languages;
pub mod output;
pub mod phases;
pub mod pipeline;
pub mod report;
