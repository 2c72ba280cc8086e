//! Implementation of the `docmerge check` command.

use std::path::PathBuf;

use docmerge::engine::validate_parts;
use miette::IntoDiagnostic;
use owo_colors::OwoColorize;

use crate::output::format_validation_table;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Template part files, named after their part (e.g. body.xml, header-1.xml)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let parts = super::load_parts(&args.files)?;
    let report = validate_parts(&parts);

    if args.json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{json}");
    } else {
        println!("{}", format_validation_table(&report));
        for part in &report.parts {
            for error in &part.errors {
                println!("{} [{}] {error}", "error:".red().bold(), part.part);
            }
        }
        if report.has_errors() {
            println!("{}", "structural errors found".red());
        } else {
            println!(
                "{} {} variables, {} conditionals, {} modifiers",
                "ok:".green().bold(),
                report.total_variables(),
                report.total_conditionals(),
                report.total_modifiers(),
            );
        }
    }

    if report.has_errors() {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
