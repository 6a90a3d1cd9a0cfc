use serde_json::Value;

use super::{field, string_list, text_field};
use crate::input::SummaryTask;
use crate::types::SummaryRecord;

pub const MAX_KEY_POINTS: usize = 5;

/// Requires `summaryShort`, `summaryLong` and at least one key point.
pub fn summary(block: &Value, _task: &SummaryTask) -> Option<SummaryRecord> {
    if !block.is_object() {
        return None;
    }

    let summary_short = text_field(block, &["summaryShort", "summary_short"])?;
    let summary_long = text_field(block, &["summaryLong", "summary_long"])?;

    let mut key_points = string_list(field(block, &["keyPoints", "key_points"]));
    key_points.truncate(MAX_KEY_POINTS);
    if key_points.is_empty() {
        return None;
    }

    Some(SummaryRecord {
        summary_short,
        summary_long,
        key_points,
    })
}
