//! Integration tests for tiered value resolution.

use docmerge::engine::MergeContext;

#[test]
fn exact_match_wins() {
    let ctx = MergeContext::from([("USR_Business", "Acme"), ("usr_business", "other")]);
    assert_eq!(ctx.resolve("USR_Business"), Some("Acme"));
    assert_eq!(ctx.resolve("usr_business"), Some("other"));
}

#[test]
fn case_insensitive_fallback() {
    let ctx = MergeContext::from([("USR_Business", "Acme")]);
    assert_eq!(ctx.resolve("usr_business"), Some("Acme"));
    assert_eq!(ctx.resolve("USR_BUSINESS"), Some("Acme"));
}

#[test]
fn substring_fallback_in_both_directions() {
    let ctx = MergeContext::from([("USR_Business", "Acme")]);
    // Identifier contains the key.
    assert_eq!(ctx.resolve("USR_Business_Name"), Some("Acme"));

    let ctx = MergeContext::from([("USR_Business_Name", "Acme")]);
    // Key contains the identifier.
    assert_eq!(ctx.resolve("USR_Business"), Some("Acme"));
}

#[test]
fn substring_tier_scans_in_insertion_order() {
    let ctx = MergeContext::from([("business_phone", "02"), ("business_fax", "03")]);
    assert_eq!(ctx.resolve("business"), Some("02"));
}

#[test]
fn no_match_is_absent() {
    let ctx = MergeContext::from([("USR_Business", "Acme")]);
    assert_eq!(ctx.resolve("USR_ABN"), None);
}

#[test]
fn exact_beats_substring() {
    let ctx = MergeContext::from([("USR_Business_Name", "long"), ("USR_Business", "exact")]);
    assert_eq!(ctx.resolve("USR_Business"), Some("exact"));
}
