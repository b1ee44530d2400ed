use std::collections::HashMap;

use serde::Serialize;

use crate::model::entry::Entry;
use crate::services::dictionary::normalize;

/// A lookup key written by more than one distinct entry. Only the last
/// writer is reachable through the index.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct KeyCollision {
    pub key: String,
    pub winner: Entry,
    pub shadowed: Vec<Entry>,
}

pub fn collisions(entries: &[Entry]) -> Vec<KeyCollision> {
    // key -> entry positions in write order
    let mut writers: HashMap<String, Vec<usize>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for (i, e) in entries.iter().enumerate() {
        for name in e.names() {
            if name.is_empty() {
                continue;
            }
            let key = normalize::key(name);
            let slot = writers.entry(key.clone()).or_insert_with(|| {
                order.push(key);
                Vec::new()
            });
            if slot.last() != Some(&i) {
                slot.push(i);
            }
        }
    }

    let mut issues = Vec::new();
    for key in order {
        let Some(positions) = writers.remove(&key) else {
            continue;
        };
        let Some((&last, earlier)) = positions.split_last() else {
            continue;
        };

        let winner = &entries[last];
        let mut shadowed: Vec<Entry> = Vec::new();
        for &p in earlier {
            let e = &entries[p];
            if e != winner && !shadowed.contains(e) {
                shadowed.push(e.clone());
            }
        }

        if !shadowed.is_empty() {
            issues.push(KeyCollision {
                key,
                winner: winner.clone(),
                shadowed,
            });
        }
    }

    issues
}
