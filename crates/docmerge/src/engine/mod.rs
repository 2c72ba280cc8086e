//! Merge engine: evaluates parsed templates against a merge context.
//!
//! This module contains the condition evaluator, the modifier pipeline, the
//! tiered value resolver (on [`MergeContext`]), the part orchestrator, and
//! the context-free structural validator.

mod condition;
mod context;
mod diagnostics;
mod error;
mod merge;
mod modifiers;
mod validate;

pub use condition::evaluate;
pub use context::MergeContext;
pub use diagnostics::{Diagnostic, MergeReport, compute_suggestions};
pub use error::MergeError;
pub use merge::{MergeOutcome, merge_parts, merge_to_writer};
pub use modifiers::{apply, apply_chain};
pub use validate::{PartValidation, ValidationReport, validate_parts};
