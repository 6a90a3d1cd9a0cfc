use std::collections::HashSet;

use curator_transcript::{Segment, segment_transcript};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::evidence::{Evidence, EvidenceMap};
use crate::types::Highlight;

pub const DEFAULT_MAX_HIGHLIGHTS: i64 = 4;
pub const MAX_HIGHLIGHTS: i64 = 8;

pub const DEFAULT_CLUSTER_K: i64 = 3;
pub const MIN_CLUSTER_K: i64 = 2;
pub const MAX_CLUSTER_K: i64 = 4;

pub const DEFAULT_TARGET_CLUSTER: &str = "平衡派";
pub const DEFAULT_DRAFT_TONE: &str = "友好";
pub const DEFAULT_CONSTRAINT: &str = "避免攻击性";

pub const DEFAULT_EPISODE_TITLE: &str = "未命名播客";
pub const DEFAULT_SHARE_TONE: &str = "理性";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
}

/// A comment as callers send it: bare text, or text with an optional id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CommentInput {
    Text(String),
    Entry {
        #[serde(default)]
        id: Option<String>,
        text: String,
    },
}

/// Trim comments, drop empty ones, and give every comment a unique id.
///
/// Caller ids are claimed first, in order; a repeated caller id is treated as
/// missing. Id-less comments get a positional id (`c1`, `c2`, ...), suffixed
/// (`c2-2`, `c2-3`, ...) when that id is already claimed.
pub fn collect_comments(inputs: Vec<CommentInput>) -> Vec<Comment> {
    let entries: Vec<(usize, Option<String>, String)> = inputs
        .into_iter()
        .enumerate()
        .filter_map(|(index, input)| {
            let (id, text) = match input {
                CommentInput::Text(text) => (None, text),
                CommentInput::Entry { id, text } => (id, text),
            };
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let id = id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty());
            Some((index, id, text.to_string()))
        })
        .collect();

    let mut taken = HashSet::new();
    let claimed: Vec<Option<String>> = entries
        .iter()
        .map(|(_, id, _)| id.clone().filter(|id| taken.insert(id.clone())))
        .collect();

    entries
        .into_iter()
        .zip(claimed)
        .map(|((index, _, text), id)| Comment {
            id: id.unwrap_or_else(|| positional_id(index, &mut taken)),
            text,
        })
        .collect()
}

fn positional_id(index: usize, taken: &mut HashSet<String>) -> String {
    let base = format!("c{}", index + 1);
    let mut id = base.clone();
    let mut suffix = 2;
    while taken.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

// ── Highlights ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub max_highlights: Option<i64>,
    /// Pre-timed segments. When absent the transcript is segmented.
    #[serde(default)]
    pub segments: Option<Vec<Segment>>,
}

#[derive(Debug, Clone)]
pub struct HighlightTask {
    pub transcript: String,
    pub max_highlights: usize,
    pub segments: Vec<Segment>,
}

/// Zero or absent means "use the default"; anything else is clamped to `1..=8`.
pub fn clamp_max_highlights(requested: Option<i64>) -> usize {
    let requested = requested
        .filter(|n| *n != 0)
        .unwrap_or(DEFAULT_MAX_HIGHLIGHTS);
    requested.clamp(1, MAX_HIGHLIGHTS) as usize
}

/// Caller-supplied segments bypass [`Segment::new`], so their ranges are
/// checked here.
pub fn check_segments(segments: &[Segment]) -> Result<()> {
    match segments.iter().find(|s| s.end_sec < s.start_sec) {
        Some(segment) => Err(Error::InvalidSegment {
            start_sec: segment.start_sec,
            end_sec: segment.end_sec,
        }),
        None => Ok(()),
    }
}

impl HighlightTask {
    pub fn new(request: HighlightRequest) -> Result<Self> {
        let transcript = request.transcript.trim().to_string();
        if transcript.is_empty() {
            return Err(Error::EmptyTranscript);
        }

        let segments = match request.segments {
            Some(supplied) => {
                check_segments(&supplied)?;
                let mut segments: Vec<Segment> = supplied
                    .into_iter()
                    .filter(|segment| !segment.text.trim().is_empty())
                    .collect();
                segments.sort_by_key(|segment| segment.start_sec);
                segments
            }
            None => segment_transcript(&transcript),
        };
        if segments.is_empty() {
            return Err(Error::NoSegments);
        }

        Ok(Self {
            transcript,
            max_highlights: clamp_max_highlights(request.max_highlights),
            segments,
        })
    }
}

// ── Clusters ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRequest {
    #[serde(default)]
    pub comments: Vec<CommentInput>,
    #[serde(default)]
    pub cluster_k: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct ClusterTask {
    pub comments: Vec<Comment>,
    pub cluster_k: usize,
    pub evidence: EvidenceMap,
}

/// `max(2, min(4, min(requested, comment_count)))`.
pub fn clamp_cluster_k(requested: Option<i64>, comment_count: usize) -> usize {
    let requested = requested.unwrap_or(DEFAULT_CLUSTER_K);
    let count = i64::try_from(comment_count).unwrap_or(i64::MAX);
    requested.min(count).min(MAX_CLUSTER_K).max(MIN_CLUSTER_K) as usize
}

impl ClusterTask {
    pub fn new(request: ClusterRequest) -> Result<Self> {
        let comments = collect_comments(request.comments);
        if comments.len() < 2 {
            return Err(Error::TooFewComments {
                found: comments.len(),
                required: 2,
            });
        }

        Ok(Self {
            cluster_k: clamp_cluster_k(request.cluster_k, comments.len()),
            evidence: EvidenceMap::from_comments(&comments),
            comments,
        })
    }
}

// ── Drafts ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    #[serde(default)]
    pub target_cluster: Option<String>,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub constraints: Option<Vec<String>>,
    /// Excerpts the drafts may quote, most relevant first.
    #[serde(default)]
    pub evidence: Option<Vec<Evidence>>,
}

#[derive(Debug, Clone)]
pub struct DraftTask {
    pub target_cluster: String,
    pub tone: String,
    pub constraints: Vec<String>,
    pub evidence: Vec<Evidence>,
}

impl From<DraftRequest> for DraftTask {
    fn from(request: DraftRequest) -> Self {
        let constraints: Vec<String> = request
            .constraints
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        let constraints = if constraints.is_empty() {
            vec![DEFAULT_CONSTRAINT.to_string()]
        } else {
            constraints
        };

        let evidence = request
            .evidence
            .unwrap_or_default()
            .into_iter()
            .filter(|e| !e.text.trim().is_empty())
            .map(|e| Evidence::new(e.id.trim(), e.text.trim()))
            .collect();

        Self {
            target_cluster: non_blank(request.target_cluster, DEFAULT_TARGET_CLUSTER),
            tone: non_blank(request.tone, DEFAULT_DRAFT_TONE),
            constraints,
            evidence,
        }
    }
}

// ── Summary ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    Short,
    #[default]
    Long,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    #[serde(default)]
    pub post: String,
    #[serde(default)]
    pub comments: Vec<CommentInput>,
    #[serde(default)]
    pub mode: SummaryMode,
}

#[derive(Debug, Clone)]
pub struct SummaryTask {
    pub post: String,
    pub comments: Vec<Comment>,
    pub mode: SummaryMode,
}

impl SummaryTask {
    pub fn new(request: SummaryRequest) -> Result<Self> {
        let post = request.post.trim().to_string();
        if post.is_empty() {
            return Err(Error::EmptyPost);
        }

        let comments = collect_comments(request.comments);
        if comments.is_empty() {
            return Err(Error::NoComments);
        }

        Ok(Self {
            post,
            comments,
            mode: request.mode,
        })
    }
}

// ── Share card ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCardRequest {
    #[serde(default)]
    pub episode_title: Option<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ShareCardTask {
    pub episode_title: String,
    pub highlights: Vec<Highlight>,
    pub tone: String,
}

impl From<ShareCardRequest> for ShareCardTask {
    fn from(request: ShareCardRequest) -> Self {
        Self {
            episode_title: non_blank(request.episode_title, DEFAULT_EPISODE_TITLE),
            highlights: request.highlights,
            tone: non_blank(request.tone, DEFAULT_SHARE_TONE),
        }
    }
}
