//! Where a word's pronunciation comes from, and the bounded cache of
//! downloaded recordings.
//!
//! Playback itself happens on the client. The server remembers which remote
//! recordings a client has downloaded (key `file:<url>` → local file uri) and
//! tells it which files to delete once the cache is over capacity.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;

use crate::domain::VocabularyEntry;

/// Storage behind the LRU cache.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.map.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }
}

/// Least-recently-used cache over any `KeyValueStore`.
#[derive(Debug)]
pub struct LruCache<S> {
    store: S,
    /// Most recently used first.
    order: VecDeque<String>,
    capacity: usize,
}

impl<S: KeyValueStore> LruCache<S> {
    pub fn new(store: S, capacity: usize) -> Self {
        Self { store, order: VecDeque::new(), capacity }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_front(key.to_string());
    }

    /// Value for `key`, marking it most recently used.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let value = self.store.get(key)?;
        self.touch(key);
        Some(value)
    }

    /// Insert or replace `key`; returns the values evicted to stay within capacity.
    pub fn insert(&mut self, key: &str, value: String) -> Vec<String> {
        self.store.set(key, value);
        self.touch(key);

        let mut evicted = Vec::new();
        while self.order.len() > self.capacity {
            if let Some(old) = self.order.pop_back() {
                evicted.extend(self.store.remove(&old));
            }
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

#[cfg(test)]
impl<S: KeyValueStore> LruCache<S> {
    fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioSource {
    /// Previously downloaded recording.
    Cached { file_uri: String },
    /// Recording to download.
    Remote { url: String },
    /// No recording: speak the pinyin.
    Tts { text: String, language: String },
}

pub fn cache_key(url: &str) -> String {
    format!("file:{url}")
}

pub fn resolve_audio<S: KeyValueStore>(
    entry: &VocabularyEntry,
    cache: &mut LruCache<S>,
    tts_language: &str,
) -> AudioSource {
    match entry.audio_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => match cache.get(&cache_key(url)) {
            Some(file_uri) => AudioSource::Cached { file_uri },
            None => AudioSource::Remote { url: url.to_string() },
        },
        None => AudioSource::Tts { text: entry.pinyin.clone(), language: tts_language.to_string() },
    }
}

/// Remember a downloaded recording. Returns file uris the client should delete.
/// Entries without a remote recording have nothing to cache.
pub fn record_download<S: KeyValueStore>(
    entry: &VocabularyEntry,
    file_uri: &str,
    cache: &mut LruCache<S>,
) -> Option<Vec<String>> {
    let url = entry.audio_url.as_deref().filter(|u| !u.trim().is_empty())?;
    Some(cache.insert(&cache_key(url), file_uri.to_string()))
}
