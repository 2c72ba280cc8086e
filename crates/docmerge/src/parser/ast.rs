//! Public AST types for merge-tag templates.
//!
//! These types are public to enable external tooling (validators, CLI
//! reporting) in addition to the merge engine itself.

/// A parsed template part: a token stream covering the entire input.
///
/// Every input byte belongs to a `Literal` token or was consumed into a
/// structural token, so re-concatenating the literal text of all tokens
/// reproduces the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub tokens: Vec<Token>,
}

/// A parsed unit within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Literal markup text, passed through untouched.
    Literal(String),
    /// A merge tag: `{$Name}` or `{$Name|modifier:arg}`.
    Variable {
        name: String,
        modifiers: Vec<Modifier>,
    },
    /// A conditional block: `{if ...}` / `{listif ...}` with branches.
    Conditional {
        kind: BlockKind,
        branches: Vec<Branch>,
    },
}

/// The kind of a conditional block.
///
/// `ListIf` supports a single branch only (no `elseif`/`else`); the
/// asymmetry with `If` is part of the template language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    ListIf,
}

impl BlockKind {
    /// The open-marker keyword for this block kind.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::ListIf => "listif",
        }
    }
}

/// One branch of a conditional block.
///
/// `condition` is `None` for the `{else}` branch, which is always last.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub condition: Option<Condition>,
    pub body: Vec<Token>,
}

/// A boolean condition: an `and`-conjunction of terms, evaluated
/// left-to-right with short-circuiting.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// The raw condition text as written in the template.
    pub raw: String,
    pub terms: Vec<CondTerm>,
}

/// A single conjunct of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum CondTerm {
    /// `empty($X)`: the identifier resolves to nothing or the empty string.
    Empty(String),
    /// `!empty($X)`.
    NotEmpty(String),
    /// `$X == "lit"`.
    Equals { name: String, literal: String },
    /// `$X != "lit"`.
    NotEquals { name: String, literal: String },
    /// Bare `$X`: true when the resolved value is non-empty.
    Truthy(String),
    /// A term the grammar did not recognize. Evaluates to false and is
    /// surfaced as a diagnostic.
    Unrecognized(String),
}

/// A value transform applied before substitution, in chain order.
#[derive(Debug, Clone, PartialEq)]
pub enum Modifier {
    Upper,
    Lower,
    Ucwords,
    Ucfirst,
    /// `phone_format:"%2 %3 %3"`: digit-group layout pattern.
    PhoneFormat(String),
    /// `date_format:"d F Y"`: date token pattern.
    DateFormat(String),
    /// `replace:search:replacement`: literal substring substitution.
    Replace { search: String, replacement: String },
    /// A modifier with an unknown name or malformed arguments. Skipped at
    /// render time and surfaced as a diagnostic.
    Malformed(String),
}

impl Modifier {
    /// Build a modifier from its parsed name and argument list.
    ///
    /// Unknown names and wrong arities produce [`Modifier::Malformed`]
    /// rather than failing the surrounding variable token.
    pub fn from_parts(name: &str, args: &[String]) -> Modifier {
        match (name, args) {
            ("upper", []) => Modifier::Upper,
            ("lower", []) => Modifier::Lower,
            ("ucwords", []) => Modifier::Ucwords,
            ("ucfirst", []) => Modifier::Ucfirst,
            ("phone_format", [pattern]) => Modifier::PhoneFormat(pattern.clone()),
            ("date_format", [pattern]) => Modifier::DateFormat(pattern.clone()),
            ("replace", [search, replacement]) => Modifier::Replace {
                search: search.clone(),
                replacement: replacement.clone(),
            },
            _ => {
                let mut raw = name.to_string();
                for arg in args {
                    raw.push(':');
                    raw.push_str(arg);
                }
                Modifier::Malformed(raw)
            }
        }
    }
}
