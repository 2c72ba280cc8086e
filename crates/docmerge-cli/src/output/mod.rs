//! Output formatting for CLI results.

mod table;

pub use table::{format_context_table, format_validation_table};
