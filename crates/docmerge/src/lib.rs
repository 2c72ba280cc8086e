//! Merge-tag template engine for multi-part word-processing documents.
//!
//! Templates are ordinary document markup containing placeholder tokens:
//! variables like `{$USR_Name|upper}`, conditional blocks like
//! `{if !empty($USR_ABN)}ABN {$USR_ABN}{/if}`, and list conditionals
//! (`{listif ...}{/listif}`). The engine repairs tokens that the word
//! processor split across inline markup, parses the template grammar,
//! evaluates conditions against a data context built from submitted form
//! fields, and substitutes resolved values, leaving every byte outside
//! token spans untouched.
//!
//! # Example
//!
//! ```
//! use docmerge::{MergeContext, PartName, PartSet, merge_parts};
//!
//! let ctx = MergeContext::from([("USR_Business", "Acme Pty Ltd"), ("USR_ABN", "")]);
//! let mut parts = PartSet::new();
//! parts.insert(
//!     PartName::Body,
//!     "{$USR_Business}{if !empty($USR_ABN)}, ABN {$USR_ABN}{/if}.".to_string(),
//! );
//!
//! let outcome = merge_parts(&ctx, &parts).unwrap();
//! assert_eq!(outcome.parts[&PartName::Body], "Acme Pty Ltd.");
//! ```

pub mod context_build;
pub mod engine;
pub mod normalizer;
pub mod parser;
pub mod parts;

pub use context_build::{FieldRecord, build_context};
pub use engine::{
    Diagnostic, MergeContext, MergeError, MergeOutcome, MergeReport, ValidationReport,
    merge_parts, merge_to_writer, validate_parts,
};
pub use parts::{PartName, PartSet};

/// Build a context from field records and a direct mapping, then merge it
/// into the given parts. The one-call entry point for callers holding raw
/// submission data.
pub fn merge_document(
    records: &[FieldRecord],
    mapping: &[(String, String)],
    parts: &PartSet,
) -> Result<MergeOutcome, MergeError> {
    let ctx = build_context(records, mapping);
    merge_parts(&ctx, parts)
}
