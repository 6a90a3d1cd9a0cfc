//! Turn an untyped block from the backend into a canonical record.
//!
//! Every normalizer shares one policy: items missing a required string are
//! dropped (never repaired), optional fields take caller defaults, numbers
//! that are absent or non-finite take a fixed neutral value, collections are
//! truncated to the requested size but never padded, and an empty result is
//! `None` so the caller falls back.

mod clusters;
mod drafts;
mod highlights;
mod share_card;
mod summary;

pub use clusters::clusters;
pub use drafts::{MAX_DRAFTS, drafts};
pub use highlights::{DEFAULT_SCORE, highlights};
pub use share_card::{MAX_COMMENT_DRAFTS, MAX_TAGS, share_card};
pub use summary::{MAX_KEY_POINTS, summary};

use serde_json::Value;

/// First present field among `names` (camelCase and snake_case spellings).
pub(crate) fn field<'a>(item: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names.iter().find_map(|name| item.get(name))
}

/// Trimmed, non-empty string field.
pub(crate) fn text_field(item: &Value, names: &[&str]) -> Option<String> {
    field(item, names).and_then(non_empty_text)
}

pub(crate) fn non_empty_text(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

/// Strings (or numbers, rendered) from an array, trimmed, blanks dropped.
/// Anything that is not an array yields an empty list.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Number(n) => Some(n.to_string()),
                    other => non_empty_text(other),
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The task's item array: either `block[key]` or, when the block itself is
/// an array, the block.
pub(crate) fn items<'a>(block: &'a Value, names: &[&str]) -> Option<&'a Vec<Value>> {
    match block {
        Value::Array(items) => Some(items),
        Value::Object(_) => field(block, names).and_then(Value::as_array),
        _ => None,
    }
}

/// Round and clamp into `[0, 100]`.
pub fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

/// A finite number (or numeric string) clamped into `[0, 100]`, else `default`.
pub(crate) fn score_field(value: Option<&Value>, default: u8) -> u8 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    raw.filter(|n| n.is_finite())
        .map(clamp_score)
        .unwrap_or(default)
}
