use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::normalize;

pub const DEFAULT_COMMUNITY_RUN_ID: &str = "community-demo-run";
pub const DEFAULT_REPLY_CONFIDENCE: f64 = 0.6;
pub const LOW_REPLY_CONFIDENCE: f64 = 0.4;

pub const FLAG_MISSING_SUMMARY: &str = "missing-summary";
pub const FLAG_MISSING_EVIDENCE: &str = "missing-evidence";
pub const FLAG_MISSING_CONSTRAINTS: &str = "missing-constraints";
pub const FLAG_LOW_REPLY_CONFIDENCE: &str = "low-reply-confidence";
pub const FLAG_HAS_RISK_HINT: &str = "has-risk-hint";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommunityParams {
    pub summary_length: usize,
    pub has_evidence_map: bool,
    pub risk_flags: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommunityScores {
    pub compression: u8,
    pub faithfulness: u8,
    pub safety: u8,
    pub usability: u8,
}

pub fn evaluate_community(params: &CommunityParams) -> CommunityScores {
    let compression = normalize(80.0 + params.summary_length.min(20) as f64);
    let faithfulness = normalize(if params.has_evidence_map { 88.0 } else { 55.0 });
    let safety = normalize(100.0 - params.risk_flags as f64 * 15.0);
    let usability = normalize((f64::from(compression) + f64::from(faithfulness)) / 2.0);

    CommunityScores {
        compression,
        faithfulness,
        safety,
        usability,
    }
}

pub const COMMUNITY_NOTES: [&str; 2] = [
    "Faithfulness requires evidence references to source comments.",
    "Safety score should be validated with manual edge-case checks.",
];

/// Values above 1 are read as percentages. The result is in `[0, 1]`.
pub fn normalize_confidence(raw: Option<f64>) -> f64 {
    let raw = raw
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_REPLY_CONFIDENCE);
    if raw > 1.0 {
        (raw / 100.0).min(1.0)
    } else {
        raw.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryOutput {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterOutput {
    #[serde(default)]
    pub evidence_map: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftOutput {
    #[serde(default)]
    pub constraints_applied: Option<Vec<String>>,
    #[serde(default)]
    pub risk_hint: Option<String>,
}

/// A community run report as submitted by a caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityRun {
    #[serde(default)]
    pub run_id: Option<String>,
    /// Overrides the length of `summary.text` when present.
    #[serde(default)]
    pub summary_length: Option<f64>,
    #[serde(default)]
    pub summary: Option<SummaryOutput>,
    #[serde(default)]
    pub reply_confidence: Option<f64>,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub cluster: Option<ClusterOutput>,
    #[serde(default)]
    pub draft: Option<DraftOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityInputUsed {
    pub summary_length: usize,
    pub reply_confidence: f64,
    pub flags: Vec<String>,
    pub has_evidence_map: bool,
    pub mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityReport {
    pub run_id: String,
    pub input_used: CommunityInputUsed,
    pub scores: CommunityScores,
    pub notes: Vec<String>,
}

impl CommunityRun {
    fn summary_length(&self) -> usize {
        match self.summary_length.filter(|v| v.is_finite()) {
            Some(length) => length.round().max(0.0) as usize,
            None => self
                .summary
                .as_ref()
                .and_then(|s| s.text.as_deref())
                .map_or(0, |text| text.chars().count()),
        }
    }

    fn has_evidence_map(&self) -> bool {
        self.cluster
            .as_ref()
            .and_then(|c| c.evidence_map.as_ref())
            .is_some_and(|map| !map.is_empty())
    }

    /// Caller flags followed by inferred ones, blanks and duplicates removed.
    fn flags(&self, summary_length: usize, has_evidence_map: bool, confidence: f64) -> Vec<String> {
        let draft = self.draft.as_ref();
        let has_constraints = draft
            .and_then(|d| d.constraints_applied.as_ref())
            .is_some_and(|c| !c.is_empty());
        let has_risk_hint = draft
            .and_then(|d| d.risk_hint.as_deref())
            .is_some_and(|hint| !hint.is_empty());

        let inferred = [
            (summary_length == 0, FLAG_MISSING_SUMMARY),
            (!has_evidence_map, FLAG_MISSING_EVIDENCE),
            (!has_constraints, FLAG_MISSING_CONSTRAINTS),
            (confidence < LOW_REPLY_CONFIDENCE, FLAG_LOW_REPLY_CONFIDENCE),
            (has_risk_hint, FLAG_HAS_RISK_HINT),
        ]
        .into_iter()
        .filter(|(raised, _)| *raised)
        .map(|(_, flag)| flag.to_string());

        let mut flags: Vec<String> = Vec::new();
        for flag in self.flags.iter().cloned().chain(inferred) {
            if !flag.is_empty() && !flags.contains(&flag) {
                flags.push(flag);
            }
        }
        flags
    }

    /// Every flag counts against safety.
    pub fn evaluate(self) -> CommunityReport {
        let summary_length = self.summary_length();
        let has_evidence_map = self.has_evidence_map();
        let reply_confidence = normalize_confidence(self.reply_confidence);
        let flags = self.flags(summary_length, has_evidence_map, reply_confidence);

        let scores = evaluate_community(&CommunityParams {
            summary_length,
            has_evidence_map,
            risk_flags: flags.len(),
        });

        let mode = self
            .summary
            .and_then(|s| s.mode)
            .unwrap_or_else(|| "long".to_string());

        CommunityReport {
            run_id: self
                .run_id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_COMMUNITY_RUN_ID.to_string()),
            input_used: CommunityInputUsed {
                summary_length,
                reply_confidence,
                flags,
                has_evidence_map,
                mode,
            },
            scores,
            notes: COMMUNITY_NOTES.iter().map(|n| n.to_string()).collect(),
        }
    }
}
