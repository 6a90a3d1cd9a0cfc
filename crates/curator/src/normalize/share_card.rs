use serde_json::Value;

use super::{field, string_list, text_field};
use crate::fallback::DEFAULT_TAGS;
use crate::input::ShareCardTask;
use crate::types::ShareCard;

pub const MAX_COMMENT_DRAFTS: usize = 3;
pub const MAX_TAGS: usize = 5;

/// Requires `headline`, `summary` and at least one comment draft. Missing
/// tags fall back to the default tag set.
pub fn share_card(block: &Value, _task: &ShareCardTask) -> Option<ShareCard> {
    if !block.is_object() {
        return None;
    }

    let headline = text_field(block, &["headline"])?;
    let summary = text_field(block, &["summary"])?;

    let mut comment_drafts = string_list(field(block, &["commentDrafts", "comment_drafts"]));
    comment_drafts.truncate(MAX_COMMENT_DRAFTS);
    if comment_drafts.is_empty() {
        return None;
    }

    let mut tags = string_list(block.get("tags"));
    tags.truncate(MAX_TAGS);
    if tags.is_empty() {
        tags = DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect();
    }

    Some(ShareCard {
        headline,
        summary,
        comment_drafts,
        tags,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::input::ShareCardRequest;

    fn task() -> ShareCardTask {
        ShareCardTask::from(ShareCardRequest::default())
    }

    #[test]
    fn missing_tags_take_defaults() {
        let block = json!({
            "headline": "三分钟听懂",
            "summary": "关于效率的讨论",
            "commentDrafts": ["a", "b", "c", "d"]
        });
        let card = share_card(&block, &task()).unwrap();

        assert_eq!(card.comment_drafts, ["a", "b", "c"]);
        assert_eq!(card.tags, DEFAULT_TAGS);
    }

    #[test]
    fn caps_tags() {
        let block = json!({
            "headline": "h",
            "summary": "s",
            "comment_drafts": ["a"],
            "tags": ["1", "2", "3", "4", "5", "6"]
        });
        assert_eq!(share_card(&block, &task()).unwrap().tags.len(), MAX_TAGS);
    }

    #[test]
    fn well_formed_block_round_trips() {
        let expected = ShareCard {
            headline: "长内容还是短内容｜3分钟听懂核心观点".into(),
            summary: "先对齐目标，再讨论取舍。".into(),
            comment_drafts: vec!["说得很实在".into(), "想听第二期".into()],
            tags: vec!["播客".into(), "内容创作".into()],
        };

        let block = serde_json::to_value(&expected).unwrap();
        assert_eq!(share_card(&block, &task()), Some(expected));
    }

    #[test]
    fn rejects_incomplete_cards() {
        let no_drafts = json!({ "headline": "h", "summary": "s", "commentDrafts": [] });
        let no_headline = json!({ "summary": "s", "commentDrafts": ["a"] });

        assert!(share_card(&no_drafts, &task()).is_none());
        assert!(share_card(&no_headline, &task()).is_none());
        assert!(share_card(&json!(["h"]), &task()).is_none());
    }
}
