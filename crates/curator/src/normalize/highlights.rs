use serde_json::Value;

use super::{items, score_field, text_field};
use crate::input::HighlightTask;
use crate::types::{Highlight, HighlightRecord};

/// Score given to a highlight whose score is missing or unreadable.
pub const DEFAULT_SCORE: u8 = 72;

/// Accepts `[...]` or `{"highlights": [...]}`. Items need a non-empty `quote`
/// and `reason`.
///
/// Time ranges are left at zero because backend timestamps are not trusted.
/// Callers must ground the result against the task's segments (the pipeline
/// does this in [`Task::ground`](crate::Task::ground)) before using it.
pub fn highlights(block: &Value, task: &HighlightTask) -> Option<HighlightRecord> {
    let highlights: Vec<Highlight> = items(block, &["highlights"])?
        .iter()
        .filter_map(highlight)
        .take(task.max_highlights)
        .collect();

    if highlights.is_empty() {
        return None;
    }
    Some(HighlightRecord { highlights })
}

fn highlight(item: &Value) -> Option<Highlight> {
    Some(Highlight {
        start_sec: 0,
        end_sec: 0,
        quote: text_field(item, &["quote"])?,
        reason: text_field(item, &["reason"])?,
        score: score_field(item.get("score"), DEFAULT_SCORE),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::input::HighlightRequest;

    fn task(max_highlights: i64) -> HighlightTask {
        HighlightTask::new(HighlightRequest {
            transcript: "第一句。第二句。第三句。".into(),
            max_highlights: Some(max_highlights),
            segments: None,
        })
        .unwrap()
    }

    #[test]
    fn keeps_well_formed_items() {
        let block = json!([
            { "quote": "第二句", "reason": "观点鲜明", "score": 91 },
            { "quote": "第一句", "reason": "开场", "score": 60 },
        ]);

        let record = highlights(&block, &task(4)).unwrap();
        assert_eq!(record.highlights.len(), 2);
        assert_eq!(record.highlights[0].quote, "第二句");
        assert_eq!(record.highlights[0].reason, "观点鲜明");
        assert_eq!(record.highlights[0].score, 91);
    }

    #[test]
    fn accepts_keyed_object_and_drops_bare_strings() {
        let block = json!({ "highlights": ["  第三句 ", { "quote": "第一句", "reason": "开场" }] });
        let record = highlights(&block, &task(4)).unwrap();

        assert_eq!(record.highlights.len(), 1);
        assert_eq!(record.highlights[0].quote, "第一句");
        assert_eq!(record.highlights[0].score, DEFAULT_SCORE);
    }

    #[test]
    fn drops_items_without_reason() {
        let block = json!([
            { "quote": "第一句" },
            { "quote": "第二句", "reason": "  " },
            { "quote": "第三句", "reason": "收尾有力" },
        ]);

        let record = highlights(&block, &task(4)).unwrap();
        assert_eq!(record.highlights.len(), 1);
        assert_eq!(record.highlights[0].reason, "收尾有力");
    }

    #[test]
    fn drops_items_without_quote_and_clamps_scores() {
        let block = json!([
            { "reason": "no quote", "score": 99 },
            { "quote": "   ", "reason": "blank" },
            { "quote": "第一句", "reason": "r", "score": 400 },
            { "quote": "第二句", "reason": "r", "score": "n/a" },
        ]);

        let record = highlights(&block, &task(4)).unwrap();
        let scores: Vec<_> = record.highlights.iter().map(|h| h.score).collect();
        assert_eq!(scores, [100, DEFAULT_SCORE]);
    }

    #[test]
    fn truncates_without_padding() {
        let block = json!([
            { "quote": "a", "reason": "r" },
            { "quote": "b", "reason": "r" },
            { "quote": "c", "reason": "r" },
        ]);
        assert_eq!(highlights(&block, &task(2)).unwrap().highlights.len(), 2);

        let block = json!([{ "quote": "a", "reason": "r" }]);
        assert_eq!(highlights(&block, &task(8)).unwrap().highlights.len(), 1);
    }

    #[test]
    fn rejects_empty_or_missing_collection() {
        assert!(highlights(&json!([]), &task(4)).is_none());
        assert!(highlights(&json!([{ "reason": "x" }]), &task(4)).is_none());
        assert!(highlights(&json!([{ "quote": "a" }]), &task(4)).is_none());
        assert!(
            highlights(&json!({ "items": [{ "quote": "a", "reason": "r" }] }), &task(4)).is_none()
        );
    }
}
