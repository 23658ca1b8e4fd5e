use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::review_record::ReviewRecord;

/// Every stored review, keyed by catalog id.
///
/// A book never holds an empty list or an invalid review: building one from
/// a raw document sweeps both out, and `replace` removes a key whose list
/// ends up empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReviewBook {
    entries: BTreeMap<String, Vec<ReviewRecord>>,
}

impl ReviewBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a clean book from a parsed reviews document.
    pub fn from_raw(document: Map<String, Value>) -> Self {
        let mut book = Self::new();
        for (catalog_id, value) in document {
            if let Value::Array(entries) = value {
                book.replace(&catalog_id, ReviewRecord::retain_valid(entries));
            }
        }
        book
    }

    pub fn get(&self, catalog_id: &str) -> &[ReviewRecord] {
        self.entries
            .get(catalog_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn get_mut(&mut self, catalog_id: &str) -> Option<&mut Vec<ReviewRecord>> {
        self.entries.get_mut(catalog_id)
    }

    /// Sets the reviews of one title; an empty list removes the title.
    pub fn replace(&mut self, catalog_id: &str, reviews: Vec<ReviewRecord>) {
        if reviews.is_empty() {
            self.entries.remove(catalog_id);
        } else {
            self.entries.insert(catalog_id.to_string(), reviews);
        }
    }

    /// Drops the title's entry if its last review was removed.
    pub(crate) fn prune(&mut self, catalog_id: &str) {
        if self.entries.get(catalog_id).is_some_and(Vec::is_empty) {
            self.entries.remove(catalog_id);
        }
    }

    pub fn catalog_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn contains(&self, catalog_id: &str) -> bool {
        self.entries.contains_key(catalog_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
