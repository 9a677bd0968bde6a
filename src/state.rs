//! Application state: word list, configuration, live quiz sessions and the
//! audio download cache.
//!
//! The word list is loaded once at startup and never mutated; everything
//! derived from it (series subsets, homophone indexes) is recomputed from it.

use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

use crate::audio::{LruCache, MemoryStore};
use crate::config::{load_drill_config_from_env, DrillConfig};
use crate::domain::{SeriesFilter, VocabularyEntry};
use crate::seeds::seed_entries;
use crate::session::Session;
use crate::vocab::{filter_by_series, load_entries, validate_entries};

#[derive(Clone)]
pub struct AppState {
    pub entries: Arc<Vec<VocabularyEntry>>,
    pub config: Arc<DrillConfig>,
    pub sessions: Arc<RwLock<HashMap<String, Session>>>,
    pub audio_cache: Arc<Mutex<LruCache<MemoryStore>>>,
}

impl AppState {
    /// Build state from env: load config, load (or seed) the word list, validate it.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_drill_config_from_env().unwrap_or_default();

        let entries = match &config.words_path {
            Some(path) => match load_entries(path) {
                Ok(list) => list,
                Err(e) => {
                    error!(target: "vocab", error = %e, "Word list unavailable; using built-in seed words.");
                    seed_entries()
                }
            },
            None => {
                info!(target: "vocab", "No words_path configured; using built-in seed words.");
                seed_entries()
            }
        };

        let issues = validate_entries(&entries);
        info!(target: "vocab", count = entries.len(), issues = issues.len(), "Startup word inventory");

        Self::with_entries(config, entries)
    }

    pub fn with_entries(config: DrillConfig, entries: Vec<VocabularyEntry>) -> Self {
        let cache = LruCache::new(MemoryStore::default(), config.audio.cache_capacity);
        Self {
            entries: Arc::new(entries),
            config: Arc::new(config),
            sessions: Arc::new(RwLock::new(HashMap::new())),
            audio_cache: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn entry(&self, id: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn subset(&self, filter: &SeriesFilter) -> Vec<VocabularyEntry> {
        filter_by_series(&self.entries, filter)
    }

    /// Store a new session, dropping sessions idle for longer than the configured TTL.
    #[instrument(level = "debug", skip(self, session), fields(id = %session.id))]
    pub async fn insert_session(&self, session: Session) {
        let ttl = Duration::from_secs(self.config.quiz.session_ttl_secs);
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.last_active.elapsed() < ttl);
        let expired = before - sessions.len();
        if expired > 0 {
            info!(target: "quiz", expired, live = sessions.len(), "Expired idle sessions");
        }
        sessions.insert(session.id.clone(), session);
    }

    /// Drop a session; false if it was not there.
    pub async fn remove_session(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        debug!(target: "quiz", %id, removed, "Session removal");
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use crate::seeds::seed_entries;
    use crate::session::QuizSettings;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn session(id: &str, cfg: &QuizConfig) -> Session {
        let mut rng = StdRng::seed_from_u64(1);
        Session::start(id.into(), &seed_entries(), QuizSettings::default(), cfg, &mut rng).unwrap()
    }

    #[tokio::test]
    async fn idle_sessions_are_swept_on_insert() {
        let mut config = DrillConfig::default();
        config.quiz.session_ttl_secs = 0;
        let state = AppState::with_entries(config.clone(), seed_entries());
        for i in 0..100 {
            state.insert_session(session(&format!("s{i}"), &config.quiz)).await;
        }
        let sessions = state.sessions.read().await;
        assert_eq!(sessions.len(), 1);
        assert!(sessions.contains_key("s99"));
    }

    #[tokio::test]
    async fn active_sessions_are_kept() {
        let config = DrillConfig::default();
        let state = AppState::with_entries(config.clone(), seed_entries());
        for i in 0..3 {
            state.insert_session(session(&format!("s{i}"), &config.quiz)).await;
        }
        assert_eq!(state.sessions.read().await.len(), 3);
    }

    #[tokio::test]
    async fn removed_session_is_gone() {
        let config = DrillConfig::default();
        let state = AppState::with_entries(config.clone(), seed_entries());
        state.insert_session(session("a", &config.quiz)).await;
        assert!(state.remove_session("a").await);
        assert!(!state.remove_session("a").await);
        assert!(state.sessions.read().await.is_empty());
    }
}
