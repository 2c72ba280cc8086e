//! Context builder: turns raw field records into a [`MergeContext`].
//!
//! Construction runs in three steps, where later steps only fill gaps and
//! never overwrite a non-empty value set earlier:
//!
//! 1. the user-configured direct mapping (`mergeTagName -> fieldId`);
//! 2. derived keys per field (labels, id forms, slugs);
//! 3. the scored heuristic matcher over the canonical tag catalogue.
//!
//! Building never fails; canonical tags that nothing matches simply stay
//! absent from the context.

mod catalogue;
mod fields;
mod scoring;

pub use catalogue::{CanonicalRule, default_catalogue};
pub use fields::{FieldRecord, register_derived_keys, slugify};
pub use scoring::{apply_catalogue, score_key};

use crate::engine::MergeContext;

/// Build a merge context with the shipped canonical tag catalogue.
pub fn build_context(records: &[FieldRecord], mapping: &[(String, String)]) -> MergeContext {
    build_context_with_catalogue(records, mapping, &default_catalogue())
}

/// Build a merge context with a caller-supplied catalogue.
pub fn build_context_with_catalogue(
    records: &[FieldRecord],
    mapping: &[(String, String)],
    catalogue: &[CanonicalRule],
) -> MergeContext {
    let mut ctx = MergeContext::new();

    for (tag, field_id) in mapping {
        if let Some(record) = records.iter().find(|r| &r.id == field_id)
            && !record.value.is_empty()
        {
            ctx.set_if_unset(tag.clone(), record.value.clone());
        }
    }

    for record in records {
        register_derived_keys(&mut ctx, record);
    }

    apply_catalogue(&mut ctx, catalogue);
    ctx
}
