//! Scored heuristic matcher assigning canonical tags to context keys.

use crate::engine::MergeContext;

use super::catalogue::CanonicalRule;

/// Score one candidate context key against a rule.
///
/// Per keyword: +10 for a substring match, +20 for exact equality, +5 for a
/// prefix match (the bonuses stack). Each exclude-keyword substring match
/// subtracts 15. The total is multiplied by the rule's priority. All
/// comparisons are case-insensitive.
pub fn score_key(rule: &CanonicalRule, key: &str) -> f64 {
    let key = key.to_lowercase();
    let mut score = 0.0;

    for keyword in &rule.keywords {
        let keyword = keyword.to_lowercase();
        if key.contains(&keyword) {
            score += 10.0;
        }
        if key == keyword {
            score += 20.0;
        }
        if key.starts_with(&keyword) {
            score += 5.0;
        }
    }
    for exclude in &rule.excludes {
        if key.contains(&exclude.to_lowercase()) {
            score -= 15.0;
        }
    }

    score * rule.priority
}

/// Assign canonical tags from the catalogue.
///
/// For each rule whose tag is still unset, every non-empty context key is
/// scored; the key with the strictly highest positive score wins, with ties
/// resolved by insertion order. Zero and negative scores assign nothing.
pub fn apply_catalogue(ctx: &mut MergeContext, rules: &[CanonicalRule]) {
    for rule in rules {
        if !ctx.get(&rule.tag).unwrap_or("").is_empty() {
            continue;
        }

        let mut best: Option<(f64, String)> = None;
        for (key, value) in ctx.iter() {
            if value.is_empty() || key == rule.tag {
                continue;
            }
            let score = score_key(rule, key);
            if score > 0.0 && best.as_ref().is_none_or(|(high, _)| score > *high) {
                best = Some((score, value.to_string()));
            }
        }

        if let Some((_, value)) = best {
            ctx.set_if_unset(rule.tag.clone(), value);
        }
    }
}
