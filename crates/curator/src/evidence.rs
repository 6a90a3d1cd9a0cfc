use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::input::Comment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    pub id: String,
    pub text: String,
}

impl Evidence {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Read-only lookup from evidence id to its source text.
///
/// Built once per request from the original comments, optionally extended
/// with evidence the backend declares. Entries are never overwritten: the
/// first source to claim an id keeps it, so backend output cannot rewrite
/// what a commenter actually said.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceMap(BTreeMap<String, String>);

impl EvidenceMap {
    pub fn builder() -> EvidenceMapBuilder {
        EvidenceMapBuilder::default()
    }

    pub fn from_comments(comments: &[Comment]) -> Self {
        let mut builder = Self::builder();
        for comment in comments {
            builder.insert(&comment.id, &comment.text);
        }
        builder.build()
    }

    /// Start a new map that keeps every entry of `self`.
    pub fn to_builder(&self) -> EvidenceMapBuilder {
        EvidenceMapBuilder {
            entries: self.0.clone(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Resolve ids in order, dropping any that are unknown.
    pub fn resolve<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Vec<Evidence> {
        ids.into_iter()
            .filter_map(|id| self.get(id).map(|text| Evidence::new(id, text)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct EvidenceMapBuilder {
    entries: BTreeMap<String, String>,
}

impl EvidenceMapBuilder {
    /// Add an entry. Blank ids or texts are skipped, as are ids already present.
    pub fn insert(&mut self, id: &str, text: &str) -> &mut Self {
        let (id, text) = (id.trim(), text.trim());
        if !id.is_empty() && !text.is_empty() && !self.entries.contains_key(id) {
            self.entries.insert(id.to_string(), text.to_string());
        }
        self
    }

    pub fn build(self) -> EvidenceMap {
        EvidenceMap(self.entries)
    }
}
