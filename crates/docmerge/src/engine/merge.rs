//! Part orchestrator: drives normalize -> parse -> render over every
//! present part and aggregates diagnostics.

use std::io;

use crate::normalizer::normalize;
use crate::parser::{Token, parse_template, residual_markers};
use crate::parts::{PartName, PartSet};

use super::condition::evaluate;
use super::context::MergeContext;
use super::diagnostics::{Diagnostic, MergeReport, compute_suggestions};
use super::error::MergeError;
use super::modifiers::apply_chain;

/// The result of a successful merge: transformed parts plus the report.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// Transformed markup for every part present in the input, byte-identical
    /// to the input outside reconstructed and substituted token spans.
    pub parts: PartSet,
    pub report: MergeReport,
}

/// Merge a context into a set of template parts.
///
/// Parts are processed independently; per-token problems degrade to
/// diagnostics. The only failure here is an empty part set, which makes the
/// whole operation meaningless.
pub fn merge_parts(ctx: &MergeContext, parts: &PartSet) -> Result<MergeOutcome, MergeError> {
    if parts.is_empty() {
        return Err(MergeError::NoPartsProcessed);
    }

    let mut report = MergeReport::new();
    let mut merged = PartSet::new();
    for (&name, raw) in parts {
        let text = merge_part(ctx, name, raw, &mut report);
        merged.insert(name, text);
    }

    Ok(MergeOutcome {
        parts: merged,
        report,
    })
}

/// Merge and hand each transformed part to an external writer.
///
/// A writer failure aborts the whole operation; parts already written are
/// the writer's concern to discard.
pub fn merge_to_writer<W>(
    ctx: &MergeContext,
    parts: &PartSet,
    mut write: W,
) -> Result<MergeReport, MergeError>
where
    W: FnMut(PartName, &str) -> io::Result<()>,
{
    let outcome = merge_parts(ctx, parts)?;
    for (name, text) in &outcome.parts {
        write(*name, text).map_err(|source| MergeError::PartWrite {
            part: name.to_string(),
            source,
        })?;
    }
    Ok(outcome.report)
}

/// Process a single part: normalize, parse, report leftover markers, render.
fn merge_part(ctx: &MergeContext, part: PartName, raw: &str, report: &mut MergeReport) -> String {
    let normalized = normalize(raw);
    let template = parse_template(&normalized);

    for detail in residual_markers(&template) {
        report.record(Diagnostic::StructuralError { part, detail });
    }

    render_tokens(&template.tokens, ctx, part, report)
}

/// Render a token stream to output text.
///
/// Substituted values are emitted verbatim and never rescanned, so braces
/// inside user-submitted values cannot spawn new tokens within one merge.
fn render_tokens(
    tokens: &[Token],
    ctx: &MergeContext,
    part: PartName,
    report: &mut MergeReport,
) -> String {
    let mut out = String::new();

    for token in tokens {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Variable { name, modifiers } => {
                let value = match ctx.resolve(name) {
                    Some(value) => {
                        report.variables_substituted += 1;
                        value.to_string()
                    }
                    None => {
                        let keys: Vec<String> = ctx.keys().map(ToString::to_string).collect();
                        report.record(Diagnostic::UnresolvedVariable {
                            part,
                            name: name.clone(),
                            suggestions: compute_suggestions(name, &keys),
                        });
                        String::new()
                    }
                };
                out.push_str(&apply_chain(modifiers, &value, part, report));
            }
            Token::Conditional { branches, .. } => {
                report.conditionals_resolved += 1;
                // Exactly one branch survives: the first whose condition
                // holds, or the else branch, or none.
                for branch in branches {
                    let taken = match &branch.condition {
                        Some(condition) => evaluate(condition, ctx, part, report),
                        None => true,
                    };
                    if taken {
                        out.push_str(&render_tokens(&branch.body, ctx, part, report));
                        break;
                    }
                }
            }
        }
    }

    out
}
