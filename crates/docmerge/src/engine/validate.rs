//! Structural validation of template parts without a merge context.
//!
//! Used by tooling to check a template before any submission data exists:
//! counts the tokens each part carries and reports structural problems
//! (unbalanced block markers, unterminated variable tokens).

use serde::Serialize;

use crate::normalizer::normalize;
use crate::parser::{Token, parse_template, residual_markers};
use crate::parts::{PartName, PartSet};

/// Structural findings for one template part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartValidation {
    pub part: PartName,
    /// Variable tokens found.
    pub variables: usize,
    /// Conditional blocks found, nested blocks included.
    pub conditionals: usize,
    /// Modifiers found across all variable tokens.
    pub modifiers: usize,
    /// Structural errors, one human-readable entry each.
    pub errors: Vec<String>,
}

/// Structural report over every present part.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub parts: Vec<PartValidation>,
}

impl ValidationReport {
    pub fn total_variables(&self) -> usize {
        self.parts.iter().map(|p| p.variables).sum()
    }

    pub fn total_conditionals(&self) -> usize {
        self.parts.iter().map(|p| p.conditionals).sum()
    }

    pub fn total_modifiers(&self) -> usize {
        self.parts.iter().map(|p| p.modifiers).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.parts.iter().any(|p| !p.errors.is_empty())
    }
}

/// Validate every present part. Absent parts are simply not reported;
/// an empty part set yields an empty report.
pub fn validate_parts(parts: &PartSet) -> ValidationReport {
    ValidationReport {
        parts: parts
            .iter()
            .map(|(&name, raw)| validate_part(name, raw))
            .collect(),
    }
}

fn validate_part(part: PartName, raw: &str) -> PartValidation {
    let normalized = normalize(raw);
    let template = parse_template(&normalized);

    let mut counts = TokenCounts::default();
    count_tokens(&template.tokens, &mut counts);

    PartValidation {
        part,
        variables: counts.variables,
        conditionals: counts.conditionals,
        modifiers: counts.modifiers,
        errors: residual_markers(&template),
    }
}

#[derive(Default)]
struct TokenCounts {
    variables: usize,
    conditionals: usize,
    modifiers: usize,
}

fn count_tokens(tokens: &[Token], counts: &mut TokenCounts) {
    for token in tokens {
        match token {
            Token::Literal(_) => {}
            Token::Variable { modifiers, .. } => {
                counts.variables += 1;
                counts.modifiers += modifiers.len();
            }
            Token::Conditional { branches, .. } => {
                counts.conditionals += 1;
                for branch in branches {
                    count_tokens(&branch.body, counts);
                }
            }
        }
    }
}
