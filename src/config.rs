//! Loading drill configuration (word list path, quiz and audio settings) from TOML.
//!
//! See `DrillConfig` for the expected schema. Every section is optional.

use serde::Deserialize;
use tracing::{info, error};

use crate::sampling::DEFAULT_CHOICE_COUNT;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct DrillConfig {
  /// JSON word list. Built-in seed words are used when absent.
  #[serde(default)]
  pub words_path: Option<String>,
  #[serde(default)]
  pub quiz: QuizConfig,
  #[serde(default)]
  pub audio: AudioConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
  /// Size of a multiple-choice set (correct answer included).
  pub choice_count: usize,
  /// A session needs at least this many entries after series filtering.
  pub min_selection: usize,
  /// Question cap when a session does not ask for one.
  pub default_max_questions: usize,
  /// Sessions idle for longer than this are dropped when a new one starts.
  pub session_ttl_secs: u64,
}

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      choice_count: DEFAULT_CHOICE_COUNT,
      min_selection: 5,
      default_max_questions: 20,
      session_ttl_secs: 3600,
    }
  }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
  /// How many downloaded audio files are kept before the oldest is evicted.
  pub cache_capacity: usize,
  /// Language passed to text-to-speech when an entry has no recording.
  pub tts_language: String,
}

impl Default for AudioConfig {
  fn default() -> Self {
    Self { cache_capacity: 5, tts_language: "zh-CN".into() }
  }
}

pub fn parse_config(s: &str) -> Result<DrillConfig, toml::de::Error> {
  toml::from_str::<DrillConfig>(s)
}

/// Attempt to load `DrillConfig` from DRILL_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_drill_config_from_env() -> Option<DrillConfig> {
  let path = std::env::var("DRILL_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "hanzi_drill", %path, "Loaded drill config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "hanzi_drill", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "hanzi_drill", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = parse_config("").unwrap();
    assert_eq!(cfg.words_path, None);
    assert_eq!(cfg.quiz.choice_count, 5);
    assert_eq!(cfg.quiz.min_selection, 5);
    assert_eq!(cfg.quiz.session_ttl_secs, 3600);
    assert_eq!(cfg.audio.cache_capacity, 5);
    assert_eq!(cfg.audio.tts_language, "zh-CN");
  }

  #[test]
  fn partial_sections_keep_other_defaults() {
    let cfg = parse_config(
      r#"
        words_path = "data/words.json"
        [quiz]
        choice_count = 4
        [audio]
        cache_capacity = 12
      "#,
    )
    .unwrap();
    assert_eq!(cfg.words_path.as_deref(), Some("data/words.json"));
    assert_eq!(cfg.quiz.choice_count, 4);
    assert_eq!(cfg.quiz.default_max_questions, 20);
    assert_eq!(cfg.audio.cache_capacity, 12);
  }

  #[test]
  fn malformed_toml_is_an_error() {
    assert!(parse_config("quiz = 3").is_err());
  }
}
