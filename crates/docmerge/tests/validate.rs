//! Integration tests for context-free structural validation.

use docmerge::engine::validate_parts;
use docmerge::parts::{PartName, PartSet};

fn parts(pairs: &[(PartName, &str)]) -> PartSet {
    pairs
        .iter()
        .map(|(name, markup)| (*name, markup.to_string()))
        .collect()
}

#[test]
fn counts_tokens_per_part() {
    let set = parts(&[(
        PartName::Body,
        "{$USR_Name|upper} {if $a}{$USR_ABN}{/if} {$USR_Date|date_format:\"d F Y\"}",
    )]);

    let report = validate_parts(&set);
    assert_eq!(report.parts.len(), 1);
    assert_eq!(report.parts[0].part, PartName::Body);
    assert_eq!(report.parts[0].variables, 3);
    assert_eq!(report.parts[0].conditionals, 1);
    assert_eq!(report.parts[0].modifiers, 2);
    assert!(report.parts[0].errors.is_empty());
}

#[test]
fn totals_span_all_parts() {
    let set = parts(&[
        (PartName::Body, "{$a}{$b}"),
        (PartName::Header1, "{if $x}{$c}{/if}"),
        (PartName::Footer1, "plain"),
    ]);

    let report = validate_parts(&set);
    assert_eq!(report.total_variables(), 3);
    assert_eq!(report.total_conditionals(), 1);
    assert_eq!(report.total_modifiers(), 0);
    assert!(!report.has_errors());
}

#[test]
fn reports_structural_errors() {
    let set = parts(&[
        (PartName::Body, "{if $a}unclosed"),
        (PartName::Header1, "{$broken and {/listif}"),
    ]);

    let report = validate_parts(&set);
    assert!(report.has_errors());

    let body = &report.parts[0];
    assert!(body.errors.iter().any(|e| e.contains("unclosed")));

    let header = &report.parts[1];
    assert!(header.errors.iter().any(|e| e.contains("unterminated")));
    assert!(header.errors.iter().any(|e| e.contains("{/listif}")));
}

#[test]
fn validates_split_tokens_after_normalization() {
    // A token split by inline markup still counts as one variable.
    let set = parts(&[(PartName::Body, "<w:t>{$USR_Na</w:t><w:t>me}</w:t>")]);
    let report = validate_parts(&set);
    assert_eq!(report.parts[0].variables, 1);
}

#[test]
fn empty_part_set_yields_empty_report() {
    let report = validate_parts(&PartSet::new());
    assert!(report.parts.is_empty());
    assert!(!report.has_errors());
}

#[test]
fn part_names_round_trip() {
    for name in PartName::ALL {
        assert_eq!(PartName::parse(name.as_str()), Some(name));
    }
    assert_eq!(PartName::parse("header-4"), None);
}
