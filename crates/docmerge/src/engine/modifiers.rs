//! Modifier pipeline: value transforms applied before substitution.
//!
//! Every transform is total and pure. A malformed modifier contributes the
//! value unchanged; the chain applicator records the diagnostic.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::parser::Modifier;
use crate::parts::PartName;

use super::diagnostics::{Diagnostic, MergeReport};

/// Apply a whole modifier chain in order, recording a diagnostic for each
/// malformed modifier encountered.
pub fn apply_chain(
    modifiers: &[Modifier],
    value: &str,
    part: PartName,
    report: &mut MergeReport,
) -> String {
    let mut current = value.to_string();
    for modifier in modifiers {
        if let Modifier::Malformed(raw) = modifier {
            report.record(Diagnostic::ModifierArgumentError {
                part,
                raw: raw.clone(),
            });
            continue;
        }
        current = apply(modifier, &current);
    }
    current
}

/// Apply a single modifier to a value. Total and pure; a value a modifier
/// cannot interpret (e.g. an unparsable date) passes through unchanged.
pub fn apply(modifier: &Modifier, value: &str) -> String {
    match modifier {
        Modifier::Upper => value.to_uppercase(),
        Modifier::Lower => value.to_lowercase(),
        Modifier::Ucwords => ucwords(value),
        Modifier::Ucfirst => ucfirst(value),
        Modifier::PhoneFormat(pattern) => phone_format(pattern, value),
        Modifier::DateFormat(pattern) => date_format(pattern, value),
        Modifier::Replace {
            search,
            replacement,
        } => value.replace(search.as_str(), replacement),
        Modifier::Malformed(_) => value.to_string(),
    }
}

/// Uppercase the first letter of every whitespace-separated word.
fn ucwords(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut at_word_start = true;
    for c in value.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Uppercase the first character only.
fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lay out the digits of `value` according to `pattern`.
///
/// Non-digit characters are stripped from the value into a digit stream.
/// Each `%N` placeholder (N in 1..=9) consumes the next N digits; all other
/// pattern characters pass through verbatim. When the stream runs out,
/// remaining placeholders receive whatever digits remain, possibly none.
fn phone_format(pattern: &str, value: &str) -> String {
    let mut digits = value.chars().filter(|c| c.is_ascii_digit());
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some(&n) if ('1'..='9').contains(&n) => {
                chars.next();
                let count = (n as u8 - b'0') as usize;
                out.extend(digits.by_ref().take(count));
            }
            // A lone or malformed placeholder is literal text.
            _ => out.push('%'),
        }
    }
    out
}

/// Render a date value using a PHP-style token pattern.
///
/// The value is parsed as a numeric epoch timestamp or a free-form date
/// string; on parse failure the value passes through unchanged. Recognized
/// tokens: `d` (day, zero-padded), `F` (full month name), `m` (month,
/// zero-padded), `Y` (4-digit year), `y` (2-digit year), `H`/`i`/`s`
/// (zero-padded hour/minute/second). Everything else is literal.
fn date_format(pattern: &str, value: &str) -> String {
    let Some(dt) = parse_date_value(value) else {
        return value.to_string();
    };

    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            'd' => out.push_str(&format!("{:02}", dt.day())),
            'F' => out.push_str(&dt.format("%B").to_string()),
            'm' => out.push_str(&format!("{:02}", dt.month())),
            'Y' => out.push_str(&dt.year().to_string()),
            'y' => out.push_str(&format!("{:02}", dt.year().rem_euclid(100))),
            'H' => out.push_str(&format!("{:02}", dt.hour())),
            'i' => out.push_str(&format!("{:02}", dt.minute())),
            's' => out.push_str(&format!("{:02}", dt.second())),
            other => out.push(other),
        }
    }
    out
}

/// Date-only input formats tried in order after epoch and datetime forms.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

fn parse_date_value(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed
        .strip_prefix('-')
        .unwrap_or(trimmed)
        .bytes()
        .all(|b| b.is_ascii_digit())
    {
        let epoch: i64 = trimmed.parse().ok()?;
        return DateTime::from_timestamp(epoch, 0).map(|dt| dt.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    None
}
