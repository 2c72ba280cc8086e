//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use docmerge::engine::{MergeContext, ValidationReport};

/// Format a structural validation report as an ASCII table.
pub fn format_validation_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Part", "Variables", "Conditionals", "Modifiers", "Errors"]);

    for part in &report.parts {
        table.add_row(vec![
            part.part.to_string(),
            part.variables.to_string(),
            part.conditionals.to_string(),
            part.modifiers.to_string(),
            part.errors.len().to_string(),
        ]);
    }

    table
}

/// Format a merge context as a key/value table.
pub fn format_context_table(context: &MergeContext) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Key", "Value"]);

    for (key, value) in context.iter() {
        table.add_row(vec![key, value]);
    }

    table
}
