//! Prompt text sent to the generation backend, one builder per task.

use crate::evidence::Evidence;
use crate::input::{Comment, SummaryMode};
use crate::types::Highlight;

pub fn highlights(transcript: &str, max_highlights: usize) -> String {
    [
        "你是播客内容编辑。".to_string(),
        format!("请从以下转写中提取 {max_highlights} 个高光片段，返回 JSON 数组，每项包含 quote、reason、score。"),
        "quote 必须逐字摘自转写原文；score 为 0-100，reason 要简洁。".to_string(),
        "--- transcript ---".to_string(),
        transcript.to_string(),
    ]
    .join("\n")
}

pub fn clusters(comments: &[Comment], cluster_k: usize) -> String {
    [
        "你是社区讨论分析师。".to_string(),
        format!("请将评论聚成最多 {cluster_k} 个观点簇，并提取主要分歧。"),
        "每个簇包含 label、stance、evidenceIds（引用下方评论的 id）。".to_string(),
        "返回 JSON: clusters, disagreements, evidenceMap".to_string(),
        format_comments(comments),
    ]
    .join("\n")
}

pub fn drafts(
    target_cluster: &str,
    tone: &str,
    constraints: &[String],
    evidence: &[Evidence],
) -> String {
    let mut lines = vec![
        "你是社区互动助手。".to_string(),
        "请根据给定语气生成可发布评论草稿。".to_string(),
        format!("目标观点簇: {target_cluster}"),
        format!("语气: {tone}"),
        format!("约束: {}", constraints.join("、")),
    ];
    if !evidence.is_empty() {
        lines.push("可引用的评论:".to_string());
        lines.extend(evidence.iter().map(|e| format!("- [{}] {}", e.id, e.text)));
    }
    lines.push("返回 JSON: drafts (每项包含 tone、text、riskHint), constraintsApplied".to_string());
    lines.join("\n")
}

pub fn summary(post: &str, comments: &[Comment], mode: SummaryMode) -> String {
    let focus = match mode {
        SummaryMode::Short => "读者时间有限，速读总结要尽量精炼。",
        SummaryMode::Long => "深读总结需要覆盖主要分歧。",
    };
    [
        "你是社区内容分析助手。".to_string(),
        "请生成速读总结和深读总结，并提取关键观点。".to_string(),
        focus.to_string(),
        format!("主帖：{post}"),
        format!(
            "评论：{}",
            comments
                .iter()
                .map(|c| c.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        ),
        "返回 JSON: summaryShort, summaryLong, keyPoints".to_string(),
    ]
    .join("\n")
}

pub fn share_card(episode_title: &str, highlights: &[Highlight], tone: &str) -> String {
    let highlights = serde_json::to_string(highlights).unwrap_or_default();
    [
        "你是内容运营编辑。".to_string(),
        format!("请基于高光片段生成分享文案。语气：{tone}"),
        format!("播客标题：{episode_title}"),
        format!("高光：{highlights}"),
        "返回 JSON，包含 headline、summary、commentDrafts(3条)、tags(最多5个)。".to_string(),
    ]
    .join("\n")
}

fn format_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|c| format!("[{}] {}", c.id, c.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cluster_prompt_lists_comment_ids() {
        let prompt = clusters(
            &[
                Comment { id: "c1".into(), text: "深度更好".into() },
                Comment { id: "c2".into(), text: "效率更好".into() },
            ],
            2,
        );

        assert!(prompt.contains("最多 2 个观点簇"));
        assert!(prompt.contains("[c1] 深度更好"));
        assert!(prompt.ends_with("[c2] 效率更好"));
    }

    #[test]
    fn draft_prompt_omits_empty_evidence_section() {
        let prompt = drafts("平衡派", "友好", &["避免攻击性".into()], &[]);
        assert!(!prompt.contains("可引用的评论"));
        assert!(prompt.contains("约束: 避免攻击性"));
    }

    #[test]
    fn summary_prompt_reflects_mode() {
        let comments = [Comment { id: "c1".into(), text: "看场景".into() }];
        let short = summary("长还是短", &comments, SummaryMode::Short);
        let long = summary("长还是短", &comments, SummaryMode::Long);

        assert!(short.contains("速读总结要尽量精炼"));
        assert!(long.contains("覆盖主要分歧"));
        assert!(long.contains("主帖：长还是短"));
    }
}
