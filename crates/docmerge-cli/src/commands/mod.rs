//! CLI command implementations.

mod check;
mod context;
mod merge;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use docmerge::context_build::FieldRecord;
use docmerge::parts::{PartName, PartSet};
use miette::{miette, IntoDiagnostic, WrapErr};

pub use check::{run_check, CheckArgs};
pub use context::{run_context, ContextArgs};
pub use merge::{run_merge, MergeArgs};

/// Derive the part name from a template file's stem (e.g. `header-1.xml`).
fn part_from_path(path: &Path) -> miette::Result<PartName> {
    let stem = path
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| miette!("cannot determine part name from '{}'", path.display()))?;
    PartName::parse(stem).ok_or_else(|| {
        miette!(
            "unknown part name '{stem}' (expected one of: body, header-1, header-2, \
             header-3, footer-1, footer-2, footer-3)"
        )
    })
}

/// Load template part files into a part set keyed by file stem.
fn load_parts(files: &[PathBuf]) -> miette::Result<PartSet> {
    let mut parts = PartSet::new();
    for path in files {
        let name = part_from_path(path)?;
        let markup = fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        parts.insert(name, markup);
    }
    Ok(parts)
}

/// Load field records from a JSON array file.
fn load_fields(path: &Path) -> miette::Result<Vec<FieldRecord>> {
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
    serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid field records in '{}'", path.display()))
}

/// A single tag-to-field assignment in a mapping file.
#[derive(Debug, serde::Deserialize)]
struct MapEntry {
    tag: String,
    field: String,
}

/// Load a direct tag mapping from a JSON array file, preserving order.
fn load_mapping(path: &Path) -> miette::Result<Vec<(String, String)>> {
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
    let entries: Vec<MapEntry> = serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid mapping in '{}'", path.display()))?;
    Ok(entries.into_iter().map(|e| (e.tag, e.field)).collect())
}
