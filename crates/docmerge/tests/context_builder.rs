//! Integration tests for context construction from field records.

use docmerge::context_build::{
    CanonicalRule, FieldRecord, build_context, build_context_with_catalogue, score_key, slugify,
};

fn field(id: &str, label: &str, admin: &str, value: &str) -> FieldRecord {
    FieldRecord::builder()
        .id(id)
        .label(label)
        .admin_label(admin)
        .field_type("text")
        .value(value)
        .build()
}

fn mapping(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(tag, id)| (tag.to_string(), id.to_string()))
        .collect()
}

// =============================================================================
// Direct mapping
// =============================================================================

#[test]
fn direct_mapping_sets_tag_from_field_value() {
    let records = [field("3", "Business Name", "", "Acme Pty Ltd")];
    let ctx = build_context(&records, &mapping(&[("USR_Business", "3")]));
    assert_eq!(ctx.get("USR_Business"), Some("Acme Pty Ltd"));
}

#[test]
fn direct_mapping_skips_empty_values() {
    let records = [field("3", "Business Name", "", "")];
    let ctx = build_context(&records, &mapping(&[("USR_Business", "3")]));
    assert_eq!(ctx.resolve("USR_Business"), None);
}

#[test]
fn direct_mapping_is_not_overwritten_by_later_steps() {
    let records = [
        field("1", "Business Name", "", "From Mapping"),
        field("2", "Company", "USR_Business", "From Label"),
    ];
    let ctx = build_context(&records, &mapping(&[("USR_Business", "1")]));
    assert_eq!(ctx.get("USR_Business"), Some("From Mapping"));
}

// =============================================================================
// Derived keys
// =============================================================================

#[test]
fn derived_keys_cover_labels_ids_and_slugs() {
    let records = [field("7", "Business Name", "biz", "Acme")];
    let ctx = build_context(&records, &[]);

    assert_eq!(ctx.get("biz"), Some("Acme"));
    assert_eq!(ctx.get("Business Name"), Some("Acme"));
    assert_eq!(ctx.get("BIZ"), Some("Acme"));
    assert_eq!(ctx.get("BUSINESS NAME"), Some("Acme"));
    assert_eq!(ctx.get("field_7"), Some("Acme"));
    assert_eq!(ctx.get("input_7"), Some("Acme"));
    assert_eq!(ctx.get("FIELD_7"), Some("Acme"));
    assert_eq!(ctx.get("INPUT_7"), Some("Acme"));
    assert_eq!(ctx.get("business_name"), Some("Acme"));
    assert_eq!(ctx.get("business-name"), Some("Acme"));
}

#[test]
fn empty_valued_fields_register_nothing() {
    let records = [field("7", "Business Name", "", "")];
    let ctx = build_context(&records, &[]);
    assert_eq!(ctx.get("business_name"), None);
}

#[test]
fn slugify_collapses_separators() {
    assert_eq!(slugify("Business  Name (Trading)", '_'), "business_name_trading");
    assert_eq!(slugify("ABN / ACN", '-'), "abn-acn");
}

// =============================================================================
// Scored matcher
// =============================================================================

#[test]
fn scoring_rewards_keywords_and_penalizes_excludes() {
    let rule = CanonicalRule::builder()
        .tag("USR_ABN")
        .keywords(vec!["abn".into(), "business".into()])
        .excludes(vec!["client".into()])
        .priority(1.2)
        .build();

    assert!(score_key(&rule, "business_abn_number") > 0.0);
    assert!(score_key(&rule, "client_abn") < 0.0);
    // Exact match stacks the contains, equals, and prefix bonuses.
    assert_eq!(score_key(&rule, "abn"), 35.0 * 1.2);
}

#[test]
fn matcher_picks_highest_positive_score() {
    let rule = CanonicalRule::builder()
        .tag("USR_ABN")
        .keywords(vec!["abn".into(), "business".into()])
        .excludes(vec!["client".into()])
        .priority(1.2)
        .build();

    let records = [
        field("1", "", "client_abn", "should lose"),
        field("2", "", "business_abn_number", "12 345 678 901"),
    ];
    let ctx = build_context_with_catalogue(&records, &[], &[rule]);
    assert_eq!(ctx.get("USR_ABN"), Some("12 345 678 901"));
}

#[test]
fn matcher_assigns_nothing_on_nonpositive_scores() {
    let rule = CanonicalRule::builder()
        .tag("USR_ABN")
        .keywords(vec!["abn".into()])
        .excludes(vec!["client".into()])
        .priority(1.0)
        .build();

    let records = [field("1", "", "client_abn", "penalized")];
    let ctx = build_context_with_catalogue(&records, &[], &[rule]);
    assert_eq!(ctx.get("USR_ABN"), None);
}

#[test]
fn default_catalogue_fills_common_tags() {
    let records = [
        field("1", "Business Name", "", "Acme Pty Ltd"),
        field("2", "Email Address", "", "jo@example.com"),
        field("3", "Contact Number", "", "0212345678"),
    ];
    let ctx = build_context(&records, &[]);

    assert_eq!(ctx.get("USR_Business"), Some("Acme Pty Ltd"));
    assert_eq!(ctx.get("USR_Email"), Some("jo@example.com"));
    assert_eq!(ctx.get("USR_Phone"), Some("0212345678"));
}
