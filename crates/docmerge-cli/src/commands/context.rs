//! Implementation of the `docmerge context` command.

use std::path::PathBuf;

use docmerge::context_build::build_context;
use miette::IntoDiagnostic;

use crate::output::format_context_table;

/// Arguments for the context command.
#[derive(Debug, clap::Args)]
pub struct ContextArgs {
    /// JSON file with the submission field records
    #[arg(long)]
    pub fields: PathBuf,

    /// JSON file with direct tag-to-field assignments
    #[arg(long)]
    pub map: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the context command.
pub fn run_context(args: ContextArgs) -> miette::Result<i32> {
    let records = super::load_fields(&args.fields)?;
    let mapping = match &args.map {
        Some(path) => super::load_mapping(path)?,
        None => Vec::new(),
    };
    let context = build_context(&records, &mapping);

    if args.json {
        let json = serde_json::to_string_pretty(&context).into_diagnostic()?;
        println!("{json}");
    } else {
        println!("{}", format_context_table(&context));
        println!("{} key(s)", context.len());
    }

    Ok(exitcode::OK)
}
