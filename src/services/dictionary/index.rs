use std::collections::HashMap;

use super::{hash, normalize};
use crate::model::entry::Entry;

/// Case-insensitive name lookup over one dictionary snapshot.
///
/// Every non-empty `en`, `de` and `fr` value maps to its entry in one flat
/// namespace. Keys are written in dictionary order, then en, de, fr within an
/// entry, and a later write replaces an earlier one.
#[derive(Debug, Clone, Default)]
pub struct Index {
    entries: Vec<Entry>,
    keys: HashMap<String, usize>,
    fingerprint: String,
}

impl Index {
    pub fn build(dictionary: &[Entry]) -> Self {
        let mut keys = HashMap::with_capacity(dictionary.len() * 3);

        for (i, e) in dictionary.iter().enumerate() {
            for name in e.names() {
                if !name.is_empty() {
                    keys.insert(normalize::key(name), i);
                }
            }
        }

        Self {
            entries: dictionary.to_vec(),
            keys,
            fingerprint: hash::fingerprint(dictionary),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Entry> {
        self.keys
            .get(&normalize::key(name))
            .map(|&i| &self.entries[i])
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of distinct lookup keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// True when this index was derived from exactly `dictionary`.
    pub fn is_current_for(&self, dictionary: &[Entry]) -> bool {
        self.fingerprint == hash::fingerprint(dictionary)
    }
}
