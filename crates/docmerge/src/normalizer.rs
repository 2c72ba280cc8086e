//! Run normalizer: repairs merge tags split across inline markup.
//!
//! Word processors freely fragment literal text into runs, so a tag typed as
//! `{$USR_Name}` is often stored as `{$USR_Na<tag/>me}` or worse. The
//! normalizer reconstructs every `{` ... `}` span that was interrupted by
//! inline markup into a single literal span, leaving all markup outside
//! delimiters byte-identical.
//!
//! The normalizer is total and idempotent: it never fails, and input whose
//! delimiter spans are already markup-free passes through unchanged.

/// Markup element names that end reconstruction: anything at or above
/// paragraph level. Crossing one of these would merge unrelated paragraphs
/// into a fabricated token.
const HARD_BOUNDARIES: &[&str] = &["w:p", "w:tbl", "w:tr", "w:tc", "w:body", "w:hdr", "w:ftr"];

/// Normalize a raw markup string, reconstructing delimiter spans that were
/// interrupted by inline markup.
///
/// For each `{` found, characters are accumulated until the matching `}`,
/// stripping any balanced `<...>` markup nodes encountered along the way.
/// Reconstruction is abandoned (the `{` is emitted literally) when:
///
/// - a paragraph-level boundary is crossed,
/// - a second `{` appears before the span closes (nesting is unsupported),
/// - the input ends without a closing `}`.
///
/// Whitespace runs created by stripping markup are collapsed to a single
/// space. Spans containing no markup are copied verbatim, which makes the
/// pass a no-op on already-normalized text.
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let candidate = &rest[open..];
        match reconstruct(candidate) {
            Some((span, consumed)) => {
                out.push_str(&span);
                rest = &candidate[consumed..];
            }
            None => {
                out.push('{');
                rest = &candidate[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Attempt to reconstruct one delimiter span at the start of `candidate`
/// (which begins with `{`).
///
/// Returns the reconstructed span text and the number of input bytes it
/// consumed, or `None` if reconstruction must be abandoned.
fn reconstruct(candidate: &str) -> Option<(String, usize)> {
    debug_assert!(candidate.starts_with('{'));

    let mut content = String::from("{");
    let mut stripped_markup = false;
    let mut chars = candidate.char_indices().skip(1);

    while let Some((idx, c)) = chars.next() {
        match c {
            '}' => {
                content.push('}');
                let span = if stripped_markup {
                    collapse_whitespace(&content)
                } else {
                    content
                };
                return Some((span, idx + 1));
            }
            // Nested opens are unsupported; restart scanning at the inner one.
            '{' => return None,
            '<' => {
                let tag_start = idx;
                let tag_end = loop {
                    match chars.next() {
                        Some((j, '>')) => break j,
                        Some(_) => {}
                        None => return None,
                    }
                };
                let tag = &candidate[tag_start..=tag_end];
                if is_hard_boundary(tag) {
                    return None;
                }
                stripped_markup = true;
            }
            _ => content.push(c),
        }
    }

    // Ran out of input before the closing delimiter.
    None
}

/// Whether a `<...>` node is a structural break larger than inline markup.
fn is_hard_boundary(tag: &str) -> bool {
    let inner = tag.trim_start_matches('<').trim_start_matches('/');
    let name_end = inner
        .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    HARD_BOUNDARIES.contains(&name)
}

/// Collapse every whitespace run in `text` to a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}
