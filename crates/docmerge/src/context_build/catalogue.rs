//! The canonical merge-tag catalogue.
//!
//! Each rule describes one canonical tag the scored matcher may fill in
//! when neither the direct mapping nor a derived key covered it: a keyword
//! set, an exclude-keyword set, and a priority weight.

use bon::Builder;
use serde::{Deserialize, Serialize};

/// A scoring rule for one canonical merge-tag name.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct CanonicalRule {
    /// The canonical tag this rule can assign (e.g. `USR_Business`).
    #[builder(into)]
    pub tag: String,

    /// Keywords scored positively against candidate context keys.
    pub keywords: Vec<String>,

    /// Keywords that penalize a candidate key.
    #[builder(default)]
    #[serde(default)]
    pub excludes: Vec<String>,

    /// Multiplier applied to the raw score.
    #[builder(default = 1.0)]
    #[serde(default = "default_priority")]
    pub priority: f64,
}

fn default_priority() -> f64 {
    1.0
}

fn rule(tag: &str, keywords: &[&str], excludes: &[&str], priority: f64) -> CanonicalRule {
    CanonicalRule {
        tag: tag.to_string(),
        keywords: keywords.iter().map(ToString::to_string).collect(),
        excludes: excludes.iter().map(ToString::to_string).collect(),
        priority,
    }
}

/// The shipped catalogue for the common business-document tags.
///
/// Callers with unusual forms can extend this or supply their own rules to
/// `build_context_with_catalogue`.
pub fn default_catalogue() -> Vec<CanonicalRule> {
    vec![
        rule(
            "USR_Business",
            &["business", "company", "organisation", "trading"],
            &["abn", "client"],
            1.0,
        ),
        rule("USR_ABN", &["abn", "business"], &["client"], 1.2),
        rule(
            "USR_First_Name",
            &["first_name", "first", "given"],
            &["last"],
            1.1,
        ),
        rule(
            "USR_Last_Name",
            &["last_name", "last", "surname", "family"],
            &["first"],
            1.1,
        ),
        rule(
            "USR_Name",
            &["name"],
            &["first", "last", "business", "company", "file"],
            0.9,
        ),
        rule("USR_Email", &["email", "e_mail"], &[], 1.0),
        rule(
            "USR_Phone",
            &["phone", "mobile", "telephone", "contact_number"],
            &[],
            1.0,
        ),
        rule(
            "USR_Address",
            &["address", "street", "suburb"],
            &["email"],
            1.1,
        ),
        rule("USR_Date", &["date"], &["birth"], 0.8),
    ]
}
