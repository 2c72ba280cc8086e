//! Field records and derived-key registration.

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::engine::MergeContext;

/// The flattened projection of one submitted form field, as supplied by the
/// external field-extraction collaborator.
///
/// List-valued fields arrive already joined by the caller (a single space,
/// or a comma for checkbox fields), so `value` is always a plain string.
#[derive(Debug, Clone, Default, Builder, Serialize, Deserialize)]
pub struct FieldRecord {
    /// Stable field identifier within the form.
    #[builder(into)]
    pub id: String,

    /// User-facing field label.
    #[builder(into, default)]
    #[serde(default)]
    pub label: String,

    /// Admin-facing label, often the cleaner merge-key candidate.
    #[builder(into, default)]
    #[serde(default)]
    pub admin_label: String,

    /// Field type as reported by the form (e.g. "text", "checkbox").
    #[builder(into, default)]
    #[serde(rename = "type", default)]
    pub field_type: String,

    /// Submitted value.
    #[builder(into, default)]
    #[serde(default)]
    pub value: String,
}

/// Register a field's value under every derived key: both labels, their
/// uppercase forms, `field_<id>`/`input_<id>` in both cases, and slug forms
/// of the label with `_` and `-` separators.
///
/// Fields with an empty value register nothing; existing non-empty entries
/// are never overwritten.
pub fn register_derived_keys(ctx: &mut MergeContext, record: &FieldRecord) {
    if record.value.is_empty() {
        return;
    }

    let keys = [
        record.admin_label.clone(),
        record.label.clone(),
        record.admin_label.to_uppercase(),
        record.label.to_uppercase(),
        format!("field_{}", record.id),
        format!("input_{}", record.id),
        format!("FIELD_{}", record.id),
        format!("INPUT_{}", record.id),
        slugify(&record.label, '_'),
        slugify(&record.label, '-'),
    ];
    for key in keys {
        if !key.is_empty() {
            ctx.set_if_unset(key, record.value.clone());
        }
    }
}

/// Slug form of a label: lowercase, with non-alphanumeric runs collapsed
/// into a single separator and trimmed from the ends.
pub fn slugify(label: &str, separator: char) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_separator = false;
    for c in label.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push(separator);
            }
            pending_separator = false;
            out.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }
    out
}
