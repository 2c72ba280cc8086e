//! Condition sub-grammar for `{if}` and `{listif}` blocks.
//!
//! A condition is a conjunction of terms joined by ` and ` or `&&`. Each
//! term is one of `empty($X)`, `!empty($X)`, `$X == "lit"`, `$X != "lit"`,
//! or a bare `$X`. Parsing is total: a term the grammar does not recognize
//! becomes [`CondTerm::Unrecognized`], which evaluates to false.

use winnow::combinator::{alt, delimited, opt};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::{CondTerm, Condition};

/// Parse condition text into a [`Condition`]. Never fails.
pub fn parse_condition(input: &str) -> Condition {
    let terms = split_conjuncts(input)
        .into_iter()
        .map(|piece| parse_term(piece.trim()))
        .collect();
    Condition {
        raw: input.to_string(),
        terms,
    }
}

/// Split on ` and ` / `&&`, whichever comes first at each position.
///
/// The split is textual; separator characters inside quoted literals are
/// not treated specially.
fn split_conjuncts(input: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = input;
    loop {
        let word = rest.find(" and ");
        let amp = rest.find("&&");
        let next = match (word, amp) {
            (Some(w), Some(a)) if w < a => Some((w, " and ".len())),
            (_, Some(a)) => Some((a, "&&".len())),
            (Some(w), None) => Some((w, " and ".len())),
            (None, None) => None,
        };
        match next {
            Some((pos, len)) => {
                pieces.push(&rest[..pos]);
                rest = &rest[pos + len..];
            }
            None => {
                pieces.push(rest);
                return pieces;
            }
        }
    }
}

/// Parse one conjunct, falling back to `Unrecognized`.
fn parse_term(text: &str) -> CondTerm {
    match term.parse(text) {
        Ok(parsed) => parsed,
        Err(_) => CondTerm::Unrecognized(text.to_string()),
    }
}

/// Term alternatives, in priority order.
fn term(input: &mut &str) -> ModalResult<CondTerm> {
    alt((empty_term, comparison, truthy)).parse_next(input)
}

/// `empty($X)` or `!empty($X)`.
fn empty_term(input: &mut &str) -> ModalResult<CondTerm> {
    let negated = opt('!').parse_next(input)?.is_some();
    let _ = ("empty", ws, '(', ws, '$').parse_next(input)?;
    let name = identifier.parse_next(input)?.to_string();
    let _ = (ws, ')').parse_next(input)?;
    Ok(if negated {
        CondTerm::NotEmpty(name)
    } else {
        CondTerm::Empty(name)
    })
}

/// `$X == "lit"` or `$X != "lit"`.
fn comparison(input: &mut &str) -> ModalResult<CondTerm> {
    let _ = '$'.parse_next(input)?;
    let name = identifier.parse_next(input)?.to_string();
    let _ = ws.parse_next(input)?;
    let negated = alt(("==".value(false), "!=".value(true))).parse_next(input)?;
    let _ = ws.parse_next(input)?;
    let literal = literal_value.parse_next(input)?;
    Ok(if negated {
        CondTerm::NotEquals { name, literal }
    } else {
        CondTerm::Equals { name, literal }
    })
}

/// Bare `$X`.
fn truthy(input: &mut &str) -> ModalResult<CondTerm> {
    let _ = '$'.parse_next(input)?;
    let name = identifier.parse_next(input)?.to_string();
    Ok(CondTerm::Truthy(name))
}

/// A comparison literal: quoted (single or double) or a bare word.
fn literal_value(input: &mut &str) -> ModalResult<String> {
    alt((
        delimited('"', take_while(0.., |c: char| c != '"'), '"'),
        delimited('\'', take_while(0.., |c: char| c != '\''), '\''),
        take_while(1.., |c: char| !c.is_ascii_whitespace()),
    ))
    .map(ToString::to_string)
    .parse_next(input)
}

/// Parse an identifier: `[A-Za-z0-9_]+`.
fn identifier<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_').parse_next(input)
}

/// Parse optional whitespace.
fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
