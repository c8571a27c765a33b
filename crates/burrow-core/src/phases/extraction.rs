//! Per-file fact extraction.

use log::debug;

use crate::config::FileFacts;
use crate::languages::LanguageAnalyser;
use crate::phases::parsing::ParsedFile;

/// Run the analyser's three extractors over one parsed file.
pub fn extract_facts(analyser: &dyn LanguageAnalyser, parsed: &ParsedFile) -> FileFacts {
    let facts = FileFacts {
        imports: analyser.extract_imports(&parsed.tree, &parsed.source),
        type_declarations: analyser.extract_type_declarations(&parsed.tree, &parsed.source),
        calls: analyser.extract_calls(&parsed.tree, &parsed.source),
    };
    debug!(
        "{}: {} imports, {} struct types, {} call keys",
        parsed.path.display(),
        facts.imports.len(),
        facts.type_declarations.len(),
        facts.calls.len()
    );
    facts
}
