//! Merge-tag template parser.
//!
//! This module parses normalized part markup into a token stream that the
//! merge engine renders. The parser is total: anything the grammar does not
//! recognize stays literal text, and unbalanced constructs are reported
//! through [`residual_markers`] rather than raised as errors.

pub mod ast;
mod condition;
mod template;

pub use ast::{BlockKind, Branch, CondTerm, Condition, Modifier, Template, Token};
pub use condition::parse_condition;
pub use template::{MAX_BLOCK_DEPTH, parse_template, parse_template_with_depth, residual_markers};
