use serde_json::Value;

use super::{field, items, non_empty_text, string_list, text_field};
use crate::fallback::risk_hint_for;
use crate::input::DraftTask;
use crate::types::{DraftItem, DraftRecord};

/// Most drafts kept from one backend response.
pub const MAX_DRAFTS: usize = 3;

/// Accepts `{"drafts": [...], "constraintsApplied": [...]}` or a bare draft
/// array. Items may be bare strings. Missing `tone` / `riskHint` take the
/// requested tone and the risk hint for the requested constraints.
pub fn drafts(block: &Value, task: &DraftTask) -> Option<DraftRecord> {
    let default_risk = risk_hint_for(&task.constraints);

    let drafts: Vec<DraftItem> = items(block, &["drafts"])?
        .iter()
        .filter_map(|item| draft(item, &task.tone, default_risk))
        .take(MAX_DRAFTS)
        .collect();
    if drafts.is_empty() {
        return None;
    }

    let applied = string_list(field(block, &["constraintsApplied", "constraints_applied"]));
    let constraints_applied = if applied.is_empty() {
        task.constraints.clone()
    } else {
        applied
    };

    Some(DraftRecord {
        drafts,
        constraints_applied,
    })
}

fn draft(item: &Value, tone: &str, risk_hint: &str) -> Option<DraftItem> {
    let text = if item.is_string() {
        non_empty_text(item)?
    } else {
        text_field(item, &["text"])?
    };

    Some(DraftItem {
        tone: text_field(item, &["tone"]).unwrap_or_else(|| tone.to_string()),
        text,
        risk_hint: text_field(item, &["riskHint", "risk_hint"])
            .unwrap_or_else(|| risk_hint.to_string()),
    })
}
