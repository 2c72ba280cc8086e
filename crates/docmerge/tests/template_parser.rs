//! Integration tests for template parsing.

use docmerge::parser::{
    BlockKind, CondTerm, Modifier, Template, Token, parse_template, parse_template_with_depth,
    residual_markers,
};

// =============================================================================
// Basic parsing
// =============================================================================

#[test]
fn test_pure_literal() {
    let t = parse_template("<w:t>Hello, world!</w:t>");
    assert_eq!(
        t.tokens,
        vec![Token::Literal("<w:t>Hello, world!</w:t>".into())]
    );
}

#[test]
fn test_empty_string() {
    let t = parse_template("");
    assert_eq!(t.tokens, vec![]);
}

#[test]
fn test_variable() {
    let t = parse_template("Dear {$USR_Name},");
    assert_eq!(
        t.tokens,
        vec![
            Token::Literal("Dear ".into()),
            Token::Variable {
                name: "USR_Name".into(),
                modifiers: vec![],
            },
            Token::Literal(",".into()),
        ]
    );
}

#[test]
fn test_escape_sequences() {
    let t = parse_template("{{$USR_Name}}");
    assert_eq!(t.tokens, vec![Token::Literal("{$USR_Name}".into())]);
}

// =============================================================================
// Modifiers
// =============================================================================

#[test]
fn test_modifier_chain() {
    let t = parse_template("{$USR_Name|lower|ucwords}");
    assert_eq!(
        t.tokens,
        vec![Token::Variable {
            name: "USR_Name".into(),
            modifiers: vec![Modifier::Lower, Modifier::Ucwords],
        }]
    );
}

#[test]
fn test_modifier_with_quoted_argument() {
    let t = parse_template(r#"{$USR_Phone|phone_format:"%2 %3 %3"}"#);
    assert_eq!(
        t.tokens,
        vec![Token::Variable {
            name: "USR_Phone".into(),
            modifiers: vec![Modifier::PhoneFormat("%2 %3 %3".into())],
        }]
    );
}

#[test]
fn test_replace_with_bare_arguments() {
    let t = parse_template("{$USR_ABN|replace:-:_}");
    assert_eq!(
        t.tokens,
        vec![Token::Variable {
            name: "USR_ABN".into(),
            modifiers: vec![Modifier::Replace {
                search: "-".into(),
                replacement: "_".into(),
            }],
        }]
    );
}

#[test]
fn test_unknown_modifier_is_malformed_not_literal() {
    let t = parse_template("{$USR_Name|sparkle}");
    assert_eq!(
        t.tokens,
        vec![Token::Variable {
            name: "USR_Name".into(),
            modifiers: vec![Modifier::Malformed("sparkle".into())],
        }]
    );
}

#[test]
fn test_wrong_arity_is_malformed() {
    let t = parse_template("{$d|date_format:H:i:s}");
    match &t.tokens[0] {
        Token::Variable { modifiers, .. } => {
            assert_eq!(modifiers, &vec![Modifier::Malformed("date_format:H:i:s".into())]);
        }
        other => panic!("expected variable, got {other:?}"),
    }
}

// =============================================================================
// Conditional blocks
// =============================================================================

fn only_conditional(t: &Template) -> (BlockKind, usize) {
    assert_eq!(t.tokens.len(), 1);
    match &t.tokens[0] {
        Token::Conditional { kind, branches } => (*kind, branches.len()),
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn test_simple_if() {
    let t = parse_template("{if $USR_ABN}has abn{/if}");
    assert_eq!(only_conditional(&t), (BlockKind::If, 1));
}

#[test]
fn test_if_elseif_else() {
    let t = parse_template("{if $a}1{elseif $b}2{elseif $c}3{else}4{/if}");
    assert_eq!(only_conditional(&t), (BlockKind::If, 4));

    let Token::Conditional { branches, .. } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    assert!(branches[0].condition.is_some());
    assert!(branches[3].condition.is_none());
    assert_eq!(branches[3].body, vec![Token::Literal("4".into())]);
}

#[test]
fn test_nested_if() {
    let t = parse_template("{if $a}x{if $b}y{/if}z{/if}");
    let Token::Conditional { branches, .. } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].body.len(), 3);
    assert!(matches!(
        branches[0].body[1],
        Token::Conditional {
            kind: BlockKind::If,
            ..
        }
    ));
}

#[test]
fn test_condition_terms() {
    let t = parse_template(r#"{if !empty($USR_ABN) and $USR_State == "VIC"}x{/if}"#);
    let Token::Conditional { branches, .. } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    let condition = branches[0].condition.as_ref().unwrap();
    assert_eq!(
        condition.terms,
        vec![
            CondTerm::NotEmpty("USR_ABN".into()),
            CondTerm::Equals {
                name: "USR_State".into(),
                literal: "VIC".into(),
            },
        ]
    );
}

#[test]
fn test_listif_has_no_else_support() {
    // {else} inside a listif is ordinary literal content.
    let t = parse_template("{listif $a}x{else}y{/listif}");
    let Token::Conditional { kind, branches } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    assert_eq!(*kind, BlockKind::ListIf);
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].body, vec![Token::Literal("x{else}y".into())]);
}

// =============================================================================
// Degradation on malformed input
// =============================================================================

#[test]
fn test_unclosed_if_becomes_literal() {
    let t = parse_template("{if $a}never closed");
    assert_eq!(t.tokens, vec![Token::Literal("{if $a}never closed".into())]);

    let markers = residual_markers(&t);
    assert_eq!(markers.len(), 1);
    assert!(markers[0].contains("unclosed"));
}

#[test]
fn test_stray_close_becomes_literal() {
    let t = parse_template("text {/if} more");
    assert_eq!(t.tokens, vec![Token::Literal("text {/if} more".into())]);
    assert!(!residual_markers(&t).is_empty());
}

#[test]
fn test_unterminated_variable_becomes_literal() {
    let t = parse_template("{$USR_Name and more");
    assert_eq!(t.tokens, vec![Token::Literal("{$USR_Name and more".into())]);

    let markers = residual_markers(&t);
    assert!(markers.iter().any(|m| m.contains("unterminated")));
}

#[test]
fn test_unterminated_variable_inside_branch_is_reported() {
    let t = parse_template("{if $a}{$broken oops{/if}");
    let Token::Conditional { branches, .. } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    // The degraded text is one literal even inside a branch body.
    assert_eq!(branches[0].body, vec![Token::Literal("{$broken oops".into())]);

    let markers = residual_markers(&t);
    assert!(markers.iter().any(|m| m.contains("unterminated")));
}

#[test]
fn test_stray_close_inside_branch_is_reported() {
    let t = parse_template("{if $a}x{/listif}y{/if}");
    let Token::Conditional { branches, .. } = &t.tokens[0] else {
        panic!("expected conditional");
    };
    assert_eq!(branches[0].body, vec![Token::Literal("x{/listif}y".into())]);

    let markers = residual_markers(&t);
    assert!(markers.iter().any(|m| m.contains("{/listif}")));
}

#[test]
fn test_unclosed_if_with_tab_is_reported() {
    // block_open accepts any whitespace after the keyword; the residual
    // scan must match the same forms.
    let t = parse_template("{if\t$a}never closed");
    assert_eq!(t.tokens, vec![Token::Literal("{if\t$a}never closed".into())]);

    let markers = residual_markers(&t);
    assert!(markers.iter().any(|m| m.contains("unclosed")));
}

#[test]
fn test_depth_cap_degrades_to_literal() {
    let mut input = String::new();
    for _ in 0..6 {
        input.push_str("{if $a}");
    }
    input.push('x');
    for _ in 0..6 {
        input.push_str("{/if}");
    }

    // Deep enough cap parses fine; a tiny cap leaves markers literal.
    let parsed = parse_template_with_depth(&input, 8);
    assert!(matches!(parsed.tokens[0], Token::Conditional { .. }));

    let capped = parse_template_with_depth(&input, 2);
    assert!(!residual_markers(&capped).is_empty());
}

#[test]
fn test_reconcatenation_reproduces_input() {
    // Literal and degraded tokens must cover every input byte.
    let input = "a {if $x}b{/listif} c {$bad and {$ok} d";
    let t = parse_template(input);

    let mut rebuilt = String::new();
    rebuild(&t.tokens, &mut rebuilt);
    assert!(rebuilt.contains("{$bad and "));
    assert!(rebuilt.contains(" d"));

    fn rebuild(tokens: &[Token], out: &mut String) {
        for token in tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Variable { name, .. } => {
                    out.push_str("{$");
                    out.push_str(name);
                    out.push('}');
                }
                Token::Conditional { branches, .. } => {
                    for branch in branches {
                        rebuild(&branch.body, out);
                    }
                }
            }
        }
    }
}
