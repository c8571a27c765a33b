//! Report rendering: the three-section text layout and JSON.

use std::fmt::Write as _;
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::InspectError;
use crate::report::AnalysisReport;

/// Render the report as text: imports, struct types, then calls with arguments.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::new();

    out.push_str("Imports found:\n");
    for imp in &report.imports {
        let _ = writeln!(out, "  - {imp}");
    }

    out.push_str("\nStructs found:\n");
    for name in &report.type_declarations {
        let _ = writeln!(out, "  - {name}");
    }

    out.push_str("\nFunction calls found:\n");
    for (name, args) in &report.calls {
        let joined = args
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "  - {name}({joined})");
    }
    out
}

/// Render the report as pretty-printed JSON.
pub fn render_json(report: &AnalysisReport) -> String {
    // Only strings, sequences and string-keyed maps: serialization cannot fail
    serde_json::to_string_pretty(report).unwrap_or_default()
}

pub fn render(report: &AnalysisReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(report),
        OutputFormat::Json => {
            let mut json = render_json(report);
            json.push('\n');
            json
        }
    }
}

/// Write the rendered report to a file.
pub fn write_output(
    report: &AnalysisReport,
    format: OutputFormat,
    output_path: &str,
) -> Result<(), InspectError> {
    std::fs::write(output_path, render(report, format)).map_err(|source| InspectError::Output {
        path: Path::new(output_path).to_path_buf(),
        source,
    })
}
