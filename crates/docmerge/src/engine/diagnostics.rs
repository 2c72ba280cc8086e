//! Non-fatal diagnostics collected during a merge.
//!
//! Token- and part-local problems are recovered in place and surfaced here
//! as structured events instead of being raised or written to process-wide
//! logging state. The orchestrator owns a [`MergeReport`] per operation and
//! threads it through rendering.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::parts::PartName;

/// A single diagnostic event recorded while processing a part.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A variable token's identifier did not resolve; an empty string was
    /// substituted.
    UnresolvedVariable {
        part: PartName,
        name: String,
        /// Closest context keys, for "did you mean" reporting.
        suggestions: Vec<String>,
    },
    /// Unbalanced block markers or an unterminated variable token; the
    /// offending text was left literal.
    StructuralError { part: PartName, detail: String },
    /// A modifier with an unknown name or malformed arguments was skipped;
    /// the unmodified value was substituted.
    ModifierArgumentError { part: PartName, raw: String },
    /// A condition term the grammar did not recognize; it evaluated false.
    UnrecognizedCondition { part: PartName, text: String },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnresolvedVariable {
                part,
                name,
                suggestions,
            } => {
                write!(f, "[{part}] unresolved variable '{name}'")?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean {}?)", suggestions.join(", "))?;
                }
                Ok(())
            }
            Self::StructuralError { part, detail } => {
                write!(f, "[{part}] {detail}")
            }
            Self::ModifierArgumentError { part, raw } => {
                write!(f, "[{part}] invalid modifier '{raw}' skipped")
            }
            Self::UnrecognizedCondition { part, text } => {
                write!(f, "[{part}] unrecognized condition '{text}' evaluated false")
            }
        }
    }
}

/// Aggregated outcome of one merge operation: substitution counts plus the
/// collected diagnostic events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    /// Variable tokens substituted with a resolved value.
    pub variables_substituted: usize,
    /// Conditional blocks whose branch selection was evaluated.
    pub conditionals_resolved: usize,
    /// Variable tokens whose identifier did not resolve.
    pub unresolved_variables: usize,
    /// All diagnostic events, in the order they occurred.
    pub diagnostics: Vec<Diagnostic>,
}

impl MergeReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic event, updating counters where applicable.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        if matches!(diagnostic, Diagnostic::UnresolvedVariable { .. }) {
            self.unresolved_variables += 1;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Whether any diagnostics were recorded.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Compute up to three suggested keys for an identifier that failed to
/// resolve, ordered by edit distance.
///
/// Short identifiers (three characters or fewer) only match at distance 1;
/// longer ones at distance 2.
pub fn compute_suggestions(identifier: &str, available: &[String]) -> Vec<String> {
    let max_distance = if identifier.len() <= 3 { 1 } else { 2 };

    let mut scored: Vec<(usize, &String)> = available
        .iter()
        .map(|key| (strsim::levenshtein(identifier, key), key))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort_by_key(|(distance, _)| *distance);

    scored
        .into_iter()
        .take(3)
        .map(|(_, key)| key.clone())
        .collect()
}
