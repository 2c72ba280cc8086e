//! Merge-tag template parser using winnow.
//!
//! Parses normalized markup into a token stream. Handles:
//! - Literal markup text (everything that is not a recognized tag)
//! - Variable tokens with modifier chains: `{$Name|upper|replace:a:b}`
//! - Conditional blocks: `{if ...}` / `{elseif ...}` / `{else}` / `{/if}`
//! - List conditionals: `{listif ...}` / `{/listif}` (single branch only)
//! - Escape sequences: `{{` and `}}`
//!
//! The parser is total: malformed or unbalanced constructs degrade to
//! literal text rather than failing. A nesting depth cap bounds recursion
//! on adversarial input; blocks beyond the cap are left as literal text.

use winnow::combinator::{alt, delimited, fail, not, opt, preceded, repeat};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::Stateful;
use winnow::token::{any, take_while};

use super::ast::{BlockKind, Branch, Modifier, Template, Token};
use super::condition::parse_condition;

/// Maximum conditional nesting depth before blocks degrade to literals.
pub const MAX_BLOCK_DEPTH: usize = 32;

/// Parser input carrying the current block nesting depth.
type Stream<'i> = Stateful<&'i str, BlockDepth>;

#[derive(Debug, Clone, Copy)]
struct BlockDepth {
    depth: usize,
    max: usize,
}

/// Parse a normalized template string into a token stream.
///
/// Never fails; every input byte ends up in the output stream, either as
/// literal text or consumed into a structural token.
pub fn parse_template(input: &str) -> Template {
    parse_template_with_depth(input, MAX_BLOCK_DEPTH)
}

/// Parse with an explicit nesting depth cap.
pub fn parse_template_with_depth(input: &str, max_depth: usize) -> Template {
    let mut stream = Stream {
        input,
        state: BlockDepth {
            depth: 0,
            max: max_depth,
        },
    };
    let tokens: Vec<Token> = match repeat(0.., token).parse_next(&mut stream) {
        // The literal fallback accepts any character, so this only stops
        // at end of input.
        Ok(tokens) if stream.input.is_empty() => tokens,
        _ => vec![Token::Literal(input.to_string())],
    };
    Template {
        tokens: merge_literals(tokens),
    }
}

/// Merge adjacent Literal tokens into single tokens, recursing into
/// conditional branch bodies.
fn merge_literals(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        match token {
            Token::Literal(text) => {
                if let Some(Token::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Token::Literal(text));
                }
            }
            Token::Variable { .. } => result.push(token),
            Token::Conditional { kind, branches } => result.push(Token::Conditional {
                kind,
                branches: branches
                    .into_iter()
                    .map(|branch| Branch {
                        condition: branch.condition,
                        body: merge_literals(branch.body),
                    })
                    .collect(),
            }),
        }
    }

    result
}

/// Parse a single token (escape, variable, block, or literal).
fn token(input: &mut Stream<'_>) -> ModalResult<Token> {
    alt((escape_sequence, variable, if_block, listif_block, literal_char)).parse_next(input)
}

/// Parse escape sequences: {{ -> {, }} -> }
fn escape_sequence(input: &mut Stream<'_>) -> ModalResult<Token> {
    alt((
        "{{".value(Token::Literal("{".to_string())),
        "}}".value(Token::Literal("}".to_string())),
    ))
    .parse_next(input)
}

/// Parse a single literal character.
fn literal_char(input: &mut Stream<'_>) -> ModalResult<Token> {
    any.map(|c: char| Token::Literal(c.to_string()))
        .parse_next(input)
}

/// Parse a variable token: `{$` Identifier (`|` Modifier (`:` Arg)*)* `}`
fn variable(input: &mut Stream<'_>) -> ModalResult<Token> {
    let _ = "{$".parse_next(input)?;
    let name = identifier.parse_next(input)?.to_string();
    let modifiers: Vec<Modifier> = repeat(0.., preceded('|', modifier)).parse_next(input)?;
    let _ = '}'.parse_next(input)?;
    Ok(Token::Variable { name, modifiers })
}

/// Parse one modifier with its colon-separated arguments.
///
/// Arity and name validation happen in [`Modifier::from_parts`]; a bad
/// modifier spec never invalidates the surrounding variable token.
fn modifier(input: &mut Stream<'_>) -> ModalResult<Modifier> {
    let name = identifier.parse_next(input)?.to_string();
    let args: Vec<String> = repeat(0.., preceded(':', modifier_arg)).parse_next(input)?;
    Ok(Modifier::from_parts(&name, &args))
}

/// Parse a modifier argument: quoted (single or double) or bare.
fn modifier_arg(input: &mut Stream<'_>) -> ModalResult<String> {
    alt((
        delimited('"', take_while(0.., |c: char| c != '"'), '"'),
        delimited('\'', take_while(0.., |c: char| c != '\''), '\''),
        take_while(0.., |c: char| c != ':' && c != '|' && c != '}'),
    ))
    .map(ToString::to_string)
    .parse_next(input)
}

/// Parse an `{if}` block with optional `{elseif}`/`{else}` branches.
fn if_block(input: &mut Stream<'_>) -> ModalResult<Token> {
    let cond = block_open("{if").parse_next(input)?;
    if input.state.depth >= input.state.max {
        return fail.parse_next(input);
    }

    input.state.depth += 1;
    let result = if_branches(input, cond);
    input.state.depth -= 1;

    result
}

/// Parse the branch sequence of an `{if}` block after its open marker.
fn if_branches(input: &mut Stream<'_>, first_cond: &str) -> ModalResult<Token> {
    let mut branches = vec![Branch {
        condition: Some(parse_condition(first_cond)),
        body: if_body.parse_next(input)?,
    }];

    while let Some(cond) = opt(block_open("{elseif")).parse_next(input)? {
        branches.push(Branch {
            condition: Some(parse_condition(cond)),
            body: if_body.parse_next(input)?,
        });
    }

    if opt("{else}").parse_next(input)?.is_some() {
        branches.push(Branch {
            condition: None,
            body: if_body.parse_next(input)?,
        });
    }

    let _ = "{/if}".parse_next(input)?;
    Ok(Token::Conditional {
        kind: BlockKind::If,
        branches,
    })
}

/// Parse tokens until the next `{elseif}`, `{else}`, or `{/if}` marker.
fn if_body(input: &mut Stream<'_>) -> ModalResult<Vec<Token>> {
    repeat(
        0..,
        preceded(not(alt(("{elseif", "{else}", "{/if}"))), token),
    )
    .parse_next(input)
}

/// Parse a `{listif}` block. No `elseif`/`else` branches are recognized;
/// any such markers inside the body are ordinary literal text.
fn listif_block(input: &mut Stream<'_>) -> ModalResult<Token> {
    let cond = block_open("{listif").parse_next(input)?;
    if input.state.depth >= input.state.max {
        return fail.parse_next(input);
    }

    input.state.depth += 1;
    let body: ModalResult<Vec<Token>> =
        repeat(0.., preceded(not("{/listif}"), token)).parse_next(input);
    input.state.depth -= 1;
    let body = body?;

    let _ = "{/listif}".parse_next(input)?;
    Ok(Token::Conditional {
        kind: BlockKind::ListIf,
        branches: vec![Branch {
            condition: Some(parse_condition(cond)),
            body,
        }],
    })
}

/// Parser for a block open marker: the given keyword, mandatory whitespace,
/// condition text, and the closing `}`.
fn block_open<'i>(
    keyword: &'static str,
) -> impl Parser<Stream<'i>, &'i str, ErrMode<ContextError>> {
    delimited(
        (keyword, take_while(1.., |c: char| c.is_ascii_whitespace())),
        take_while(1.., |c: char| c != '}' && c != '{'),
        '}',
    )
}

/// Parse an identifier: `[A-Za-z0-9_]+`.
fn identifier<'i>(input: &mut Stream<'i>) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Scan a parsed template for block or variable markers that ended up as
/// literal text, which indicates unbalanced or malformed constructs.
///
/// Returns one human-readable detail string per finding.
pub fn residual_markers(template: &Template) -> Vec<String> {
    let mut findings = Vec::new();
    scan_tokens(&template.tokens, &mut findings);
    findings
}

fn scan_tokens(tokens: &[Token], findings: &mut Vec<String>) {
    for token in tokens {
        match token {
            Token::Literal(text) => scan_literal(text, findings),
            Token::Variable { .. } => {}
            Token::Conditional { branches, .. } => {
                for branch in branches {
                    scan_tokens(&branch.body, findings);
                }
            }
        }
    }
}

/// Marker patterns that should never survive as literal text in a
/// well-formed template.
fn scan_literal(text: &str, findings: &mut Vec<String>) {
    for (pattern, detail) in [
        ("{/if}", "'{/if}' without a matching '{if}'"),
        ("{/listif}", "'{/listif}' without a matching '{listif}'"),
        ("{else}", "'{else}' outside an '{if}' block"),
    ] {
        for _ in text.matches(pattern) {
            findings.push(detail.to_string());
        }
    }

    // Block-open keywords accept any whitespace before the condition, so a
    // literal occurrence is matched the same way.
    for (keyword, detail) in [
        ("{if", "unclosed '{if}' block"),
        ("{listif", "unclosed '{listif}' block"),
        ("{elseif", "'{elseif}' outside an '{if}' block"),
    ] {
        let mut rest = text;
        while let Some(pos) = rest.find(keyword) {
            rest = &rest[pos + keyword.len()..];
            if rest
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_whitespace())
            {
                findings.push(detail.to_string());
            }
        }
    }

    // A variable marker still in literal text means the token never closed.
    let mut rest = text;
    while let Some(pos) = rest.find("{$") {
        let tail = &rest[pos + 2..];
        let close = tail.find('}');
        let next_open = tail.find('{');
        let terminated = match (close, next_open) {
            (Some(c), Some(o)) => c < o,
            (Some(_), None) => true,
            (None, _) => false,
        };
        if !terminated {
            findings.push("unterminated variable token".to_string());
        }
        rest = tail;
    }
}
