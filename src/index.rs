//! Homophone index: pronunciation key → ids of every entry sharing it.
//!
//! Keys are the diacritic `pinyin` string and the lower-cased `numeric`
//! string. The index is rebuilt from scratch whenever the active subset of
//! entries changes and is never mutated afterwards.

use std::collections::{BTreeSet, HashMap};

use crate::domain::VocabularyEntry;

#[derive(Clone, Debug, Default)]
pub struct PinyinIndex {
    by_key: HashMap<String, BTreeSet<String>>,
}

impl PinyinIndex {
    pub fn build(entries: &[VocabularyEntry]) -> Self {
        let mut by_key: HashMap<String, BTreeSet<String>> = HashMap::new();
        for e in entries {
            for key in keys_of(e) {
                by_key.entry(key).or_default().insert(e.id.clone());
            }
        }
        Self { by_key }
    }

    /// Ids registered under `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Ids accepted as "the same sounding answer" for `entry`; always
    /// contains the entry's own id.
    pub fn accepted_ids_for(&self, entry: &VocabularyEntry) -> BTreeSet<String> {
        let mut ids: BTreeSet<String> = keys_of(entry)
            .iter()
            .filter_map(|k| self.lookup(k))
            .flatten()
            .cloned()
            .collect();
        ids.insert(entry.id.clone());
        ids
    }
}

fn keys_of(e: &VocabularyEntry) -> Vec<String> {
    let mut keys = Vec::with_capacity(2);
    if !e.pinyin.trim().is_empty() {
        keys.push(e.pinyin.clone());
    }
    let numeric = e.numeric.trim().to_lowercase();
    if !numeric.is_empty() {
        keys.push(numeric);
    }
    keys
}
