use serde::{Deserialize, Serialize};

use crate::evidence::{Evidence, EvidenceMap};

/// Which path produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Model,
    Fallback,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model => f.write_str("model"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

/// A record plus its provenance tag. Serializes flat, with the tag under
/// `source`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Produced<R> {
    #[serde(flatten)]
    pub record: R,
    #[serde(rename = "source")]
    pub provenance: Provenance,
}

impl<R> Produced<R> {
    pub fn model(record: R) -> Self {
        Self {
            record,
            provenance: Provenance::Model,
        }
    }

    pub fn fallback(record: R) -> Self {
        Self {
            record,
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub start_sec: u32,
    pub end_sec: u32,
    pub quote: String,
    pub reason: String,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightRecord {
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub label: String,
    pub stance: String,
    /// Always the ids of `evidence`, in the same order.
    pub evidence_ids: Vec<String>,
    pub evidence: Vec<Evidence>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disagreement {
    pub topic: String,
    /// Labels of the clusters on each side.
    pub sides: Vec<String>,
    pub evidence_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRecord {
    pub clusters: Vec<Cluster>,
    pub disagreements: Vec<Disagreement>,
    pub evidence_map: EvidenceMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub tone: String,
    pub text: String,
    pub risk_hint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRecord {
    pub drafts: Vec<DraftItem>,
    pub constraints_applied: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub summary_short: String,
    pub summary_long: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCard {
    pub headline: String,
    pub summary: String,
    pub comment_drafts: Vec<String>,
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produced_serializes_flat_with_source() {
        let produced = Produced::fallback(SummaryRecord {
            summary_short: "short".into(),
            summary_long: "long".into(),
            key_points: vec!["a".into()],
        });

        assert_eq!(
            serde_json::to_value(&produced).unwrap(),
            serde_json::json!({
                "summaryShort": "short",
                "summaryLong": "long",
                "keyPoints": ["a"],
                "source": "fallback",
            })
        );
    }
}
