//! Implementation of the `docmerge merge` command.

use std::fs;
use std::path::PathBuf;

use docmerge::context_build::build_context;
use docmerge::engine::merge_to_writer;
use miette::{IntoDiagnostic, WrapErr};
use owo_colors::OwoColorize;

/// Arguments for the merge command.
#[derive(Debug, clap::Args)]
pub struct MergeArgs {
    /// Template part files, named after their part (e.g. body.xml, header-1.xml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// JSON file with the submission field records
    #[arg(long)]
    pub fields: PathBuf,

    /// JSON file with direct tag-to-field assignments
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Directory to write merged parts into
    #[arg(long, default_value = "merged")]
    pub out_dir: PathBuf,

    /// Output the merge report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the merge command.
pub fn run_merge(args: MergeArgs) -> miette::Result<i32> {
    let records = super::load_fields(&args.fields)?;
    let mapping = match &args.map {
        Some(path) => super::load_mapping(path)?,
        None => Vec::new(),
    };
    let context = build_context(&records, &mapping);
    let parts = super::load_parts(&args.files)?;

    fs::create_dir_all(&args.out_dir)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to create '{}'", args.out_dir.display()))?;

    let report = merge_to_writer(&context, &parts, |name, text| {
        fs::write(args.out_dir.join(format!("{name}.xml")), text)
    })
    .into_diagnostic()?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        println!(
            "merged {} part(s) into '{}'",
            parts.len(),
            args.out_dir.display()
        );
        println!(
            "{} variables substituted, {} conditionals resolved",
            report.variables_substituted, report.conditionals_resolved
        );
        for diagnostic in &report.diagnostics {
            println!("{} {diagnostic}", "warning:".yellow().bold());
        }
    }

    if report.has_diagnostics() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
