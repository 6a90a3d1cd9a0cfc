//! Deterministic records built from task inputs alone.
//!
//! Every function here is total: given a validated task it returns a record
//! that satisfies the same invariants as a normalized backend record.

use crate::input::{ClusterTask, DraftTask, HighlightTask, ShareCardTask, SummaryTask};
use crate::types::{
    Cluster, ClusterRecord, Disagreement, DraftItem, DraftRecord, Highlight, HighlightRecord,
    ShareCard, SummaryRecord,
};

pub const HIGHLIGHT_REASON: &str = "启发性内容，适合分享";
pub const HIGHLIGHT_SCORE_CEILING: u8 = 78;
pub const HIGHLIGHT_SCORE_STEP: u8 = 3;

pub const CLUSTER_PRESETS: [(&str, &str); 4] = [
    ("深度内容派", "强调完整表达与长期价值"),
    ("传播效率派", "强调易传播和触达效率"),
    ("平衡折中派", "主张兼顾深度与效率"),
    ("平台形态派", "认为内容形态应由平台决定"),
];
pub const GENERIC_STANCE: &str = "其他观点";
pub const DISAGREEMENT_TOPIC: &str = "内容深度与传播效率的优先级排序";
const MAX_DISAGREEMENT_SIDES: usize = 3;

const RISK_HINTS: [(&str, &str); 4] = [
    ("避免攻击性", "避免人身判断"),
    ("避免绝对化", "避免绝对化表达"),
    ("保持中立", "避免站队表态"),
    ("简洁", "避免冗长铺陈"),
];
pub const DEFAULT_RISK_HINT: &str = "避免绝对化表达";
const EXCERPT_CHARS: usize = 24;

pub const SUMMARY_SHORT_CHARS: usize = 36;
const FALLBACK_KEY_POINTS: usize = 3;

pub const DEFAULT_TAGS: [&str; 3] = ["播客", "高光", "内容效率"];

/// Risk hint for the first requested constraint found in the table.
pub fn risk_hint_for(constraints: &[String]) -> &'static str {
    constraints
        .iter()
        .find_map(|constraint| {
            RISK_HINTS
                .iter()
                .find(|(key, _)| constraint.trim() == *key)
                .map(|(_, hint)| *hint)
        })
        .unwrap_or(DEFAULT_RISK_HINT)
}

/// First `max_chars` characters of `text`, and whether anything was cut.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => (&text[..end], true),
        None => (text, false),
    }
}

// ── Highlights ────────────────────────────────────────────────────────────────

/// The first `max_highlights` segments, in transcript order, with their own
/// time ranges and scores stepping down from the ceiling.
pub fn highlights(task: &HighlightTask) -> HighlightRecord {
    let highlights = task
        .segments
        .iter()
        .take(task.max_highlights)
        .enumerate()
        .map(|(index, segment)| {
            let step = u8::try_from(index)
                .unwrap_or(u8::MAX)
                .saturating_mul(HIGHLIGHT_SCORE_STEP);
            Highlight {
                start_sec: segment.start_sec,
                end_sec: segment.end_sec,
                quote: segment.text.trim().to_string(),
                reason: HIGHLIGHT_REASON.to_string(),
                score: HIGHLIGHT_SCORE_CEILING.saturating_sub(step),
            }
        })
        .collect();

    HighlightRecord { highlights }
}

// ── Clusters ──────────────────────────────────────────────────────────────────

fn preset(index: usize) -> (String, String) {
    match CLUSTER_PRESETS.get(index) {
        Some((label, stance)) => (label.to_string(), stance.to_string()),
        None => (format!("观点{}", index + 1), GENERIC_STANCE.to_string()),
    }
}

/// Comment `i` goes to cluster `i % cluster_k`. One canned disagreement spans
/// the first two or three clusters.
pub fn clusters(task: &ClusterTask) -> ClusterRecord {
    let cluster_k = task.cluster_k.max(1);

    let mut groups: Vec<Vec<&str>> = vec![Vec::new(); cluster_k];
    for (index, comment) in task.comments.iter().enumerate() {
        groups[index % cluster_k].push(comment.id.as_str());
    }

    let clusters: Vec<Cluster> = groups
        .into_iter()
        .enumerate()
        .map(|(index, ids)| {
            let (label, stance) = preset(index);
            let evidence = task.evidence.resolve(ids);
            Cluster {
                label,
                stance,
                evidence_ids: evidence.iter().map(|e| e.id.clone()).collect(),
                evidence,
            }
        })
        .collect();

    let sides = &clusters[..clusters.len().min(MAX_DISAGREEMENT_SIDES)];
    let disagreement = Disagreement {
        topic: DISAGREEMENT_TOPIC.to_string(),
        sides: sides.iter().map(|c| c.label.clone()).collect(),
        evidence_ids: sides
            .iter()
            .filter_map(|c| c.evidence_ids.first().cloned())
            .collect(),
    };

    ClusterRecord {
        clusters,
        disagreements: vec![disagreement],
        evidence_map: task.evidence.clone(),
    }
}

// ── Drafts ────────────────────────────────────────────────────────────────────

/// Exactly two drafts: one addressing the target cluster, one building on the
/// first evidence excerpt when there is one.
pub fn drafts(task: &DraftTask) -> DraftRecord {
    let risk_hint = risk_hint_for(&task.constraints);

    let opening = format!(
        "我理解 {} 的观点，或许可以补充一个可执行的中间方案。",
        task.target_cluster
    );
    let follow_up = match task.evidence.first() {
        Some(evidence) => {
            let (excerpt, cut) = truncate_chars(&evidence.text, EXCERPT_CHARS);
            let ellipsis = if cut { "…" } else { "" };
            format!("“{excerpt}{ellipsis}”这一点值得展开，我们先对齐目标再讨论取舍。")
        }
        None => "我们先对齐目标，再讨论是深内容还是碎片化更优。".to_string(),
    };

    DraftRecord {
        drafts: [opening, follow_up]
            .into_iter()
            .map(|text| DraftItem {
                tone: task.tone.clone(),
                text,
                risk_hint: risk_hint.to_string(),
            })
            .collect(),
        constraints_applied: task.constraints.clone(),
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

pub fn summary(task: &SummaryTask) -> SummaryRecord {
    let (head, cut) = truncate_chars(&task.post, SUMMARY_SHORT_CHARS);
    let summary_short = if cut {
        format!("讨论核心：{head}...")
    } else {
        format!("讨论核心：{head}")
    };

    let summary_long = format!(
        "主帖围绕“{}”展开，{} 条评论中存在效率优先、深度优先和折中方案三类观点。",
        task.post,
        task.comments.len()
    );

    SummaryRecord {
        summary_short,
        summary_long,
        key_points: task
            .comments
            .iter()
            .take(FALLBACK_KEY_POINTS)
            .map(|c| c.text.clone())
            .collect(),
    }
}

// ── Share card ────────────────────────────────────────────────────────────────

pub fn share_card(task: &ShareCardTask) -> ShareCard {
    let best = task.highlights.first();

    let summary = match best {
        Some(h) => format!("{}（{}）", h.quote, h.reason),
        None => "本期内容讨论了效率与创作。".to_string(),
    };
    let resonance = best.map_or("内容结构很清晰", |h| h.quote.as_str());
    let pace = if task.tone == "理性" { "克制" } else { "有感染力" };

    ShareCard {
        headline: format!("{}｜3分钟听懂核心观点", task.episode_title),
        summary,
        comment_drafts: vec![
            format!("我最有共鸣的是：{resonance}"),
            format!("这期很适合通勤听，节奏{pace}"),
            "欢迎补充你印象最深的一段。".to_string(),
        ],
        tags: DEFAULT_TAGS.iter().map(|tag| tag.to_string()).collect(),
    }
}
