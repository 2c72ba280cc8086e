//! Condition evaluation against a merge context.

use crate::parser::{CondTerm, Condition};
use crate::parts::PartName;

use super::context::MergeContext;
use super::diagnostics::{Diagnostic, MergeReport};

/// Evaluate a condition against the context. Total: terms the grammar did
/// not recognize evaluate to false and are recorded as diagnostics.
///
/// Terms are conjoined left-to-right with short-circuiting, so diagnostics
/// are only emitted for terms that were actually reached.
pub fn evaluate(
    condition: &Condition,
    ctx: &MergeContext,
    part: PartName,
    report: &mut MergeReport,
) -> bool {
    for term in &condition.terms {
        if !evaluate_term(term, ctx, part, report) {
            return false;
        }
    }
    true
}

fn evaluate_term(
    term: &CondTerm,
    ctx: &MergeContext,
    part: PartName,
    report: &mut MergeReport,
) -> bool {
    match term {
        CondTerm::Empty(name) => is_empty(ctx, name),
        CondTerm::NotEmpty(name) => !is_empty(ctx, name),
        // An identifier that resolves to nothing compares as empty string.
        CondTerm::Equals { name, literal } => ctx.resolve(name).unwrap_or("") == literal,
        CondTerm::NotEquals { name, literal } => ctx.resolve(name).unwrap_or("") != literal,
        CondTerm::Truthy(name) => !is_empty(ctx, name),
        CondTerm::Unrecognized(text) => {
            report.record(Diagnostic::UnrecognizedCondition {
                part,
                text: text.clone(),
            });
            false
        }
    }
}

/// Empty means the identifier resolves to nothing or to the empty string.
fn is_empty(ctx: &MergeContext, name: &str) -> bool {
    ctx.resolve(name).unwrap_or("").is_empty()
}
