//! Per-walk phases: discovery, parsing, extraction.

pub mod discovery;
pub mod extraction;
pub mod parsing;
