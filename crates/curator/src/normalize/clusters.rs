use serde_json::Value;

use super::{field, items, non_empty_text, string_list, text_field};
use crate::evidence::{Evidence, EvidenceMap};
use crate::input::ClusterTask;
use crate::types::{Cluster, ClusterRecord, Disagreement};

const EVIDENCE_IDS: &[&str] = &["evidenceIds", "evidence_ids"];

/// Accepts `{"clusters": [...], "disagreements": [...], "evidenceMap": {...}}`
/// or a bare cluster array.
///
/// The evidence map is built once: the task's comments first, then the
/// backend's `evidenceMap`, then explicit `{id, text}` evidence inside
/// clusters. Earlier sources keep their ids.
pub fn clusters(block: &Value, task: &ClusterTask) -> Option<ClusterRecord> {
    let raw = items(block, &["clusters"])?;
    let evidence_map = merged_evidence(block, raw, &task.evidence);

    let clusters: Vec<Cluster> = raw
        .iter()
        .filter_map(|item| cluster(item, &evidence_map))
        .take(task.cluster_k)
        .collect();
    if clusters.is_empty() {
        return None;
    }

    let disagreements = field(block, &["disagreements"])
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| disagreement(item, &clusters, &evidence_map))
                .collect()
        })
        .unwrap_or_default();

    Some(ClusterRecord {
        clusters,
        disagreements,
        evidence_map,
    })
}

fn merged_evidence(block: &Value, raw: &[Value], base: &EvidenceMap) -> EvidenceMap {
    let mut builder = base.to_builder();

    let declared = field(block, &["evidenceMap", "evidence_map"]).and_then(Value::as_object);
    if let Some(declared) = declared {
        for (id, text) in declared {
            if let Some(text) = text.as_str() {
                builder.insert(id, text);
            }
        }
    }

    for item in raw {
        for evidence in explicit_evidence(item) {
            builder.insert(&evidence.id, &evidence.text);
        }
    }

    builder.build()
}

/// Evidence the item spells out itself. Objects carry their own id or borrow
/// the id at the same position in `evidenceIds`; bare strings always borrow.
/// Entries that end up without an id or text are skipped.
fn explicit_evidence(item: &Value) -> Vec<Evidence> {
    let Some(entries) = item.get("evidence").and_then(Value::as_array) else {
        return Vec::new();
    };
    let ids = string_list(field(item, EVIDENCE_IDS));

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let (id, text) = match entry {
                Value::String(_) => (ids.get(index).cloned(), non_empty_text(entry)),
                Value::Object(_) => (
                    text_field(entry, &["id"]).or_else(|| ids.get(index).cloned()),
                    text_field(entry, &["text"]),
                ),
                _ => (None, None),
            };
            Some(Evidence::new(id?, text?))
        })
        .collect()
}

fn cluster(item: &Value, evidence_map: &EvidenceMap) -> Option<Cluster> {
    let label = text_field(item, &["label"])?;
    let stance = text_field(item, &["stance"])?;

    let explicit = explicit_evidence(item);
    let evidence = if explicit.is_empty() {
        let ids = string_list(field(item, EVIDENCE_IDS));
        evidence_map.resolve(ids.iter().map(String::as_str))
    } else {
        explicit
    };

    Some(Cluster {
        label,
        stance,
        evidence_ids: evidence.iter().map(|e| e.id.clone()).collect(),
        evidence,
    })
}

/// Bare strings become a topic with no sides. Objects need a `topic`; their
/// sides must name kept clusters and their ids must resolve.
fn disagreement(
    item: &Value,
    clusters: &[Cluster],
    evidence_map: &EvidenceMap,
) -> Option<Disagreement> {
    if item.is_string() {
        return Some(Disagreement {
            topic: non_empty_text(item)?,
            sides: Vec::new(),
            evidence_ids: Vec::new(),
        });
    }

    let topic = text_field(item, &["topic"])?;
    let sides = string_list(item.get("sides"))
        .into_iter()
        .filter(|side| clusters.iter().any(|c| &c.label == side))
        .collect();
    let evidence_ids = string_list(field(item, EVIDENCE_IDS))
        .into_iter()
        .filter(|id| evidence_map.contains(id))
        .collect();

    Some(Disagreement {
        topic,
        sides,
        evidence_ids,
    })
}
