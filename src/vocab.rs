//! Word list loading and load-time data checks.
//!
//! Entries are authored by hand, so the `pinyin` and `numeric` spellings can
//! drift apart. `validate_entries` reports such problems; they are logged and
//! never stop the service.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::{SeriesFilter, VocabularyEntry};
use crate::error::VocabError;
use crate::pinyin::{suggest_pinyin, unknown_readings};
use crate::tones::{normalize_umlaut, numeric_to_diacritic};
use crate::util::is_cjk;

/// A data-quality problem found in one entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryIssue {
  DuplicateId { id: String },
  EmptyPinyin { id: String, suggestion: String },
  NumericMismatch { id: String, numeric_rendered: String, pinyin: String },
  NonHanzi { id: String, hanzi: String },
  UnknownReading { id: String, hanzi: char, syllable: String },
}

#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<VocabularyEntry>, VocabError> {
  let path_str = path.as_ref().display().to_string();
  let raw = std::fs::read_to_string(path.as_ref())
    .map_err(|source| VocabError::Io { path: path_str.clone(), source })?;
  let entries: Vec<VocabularyEntry> = serde_json::from_str(&raw)
    .map_err(|source| VocabError::Json { path: path_str.clone(), source })?;
  info!(target: "vocab", path = %path_str, count = entries.len(), "Loaded word list");
  Ok(entries)
}

fn comparable(s: &str) -> String {
  normalize_umlaut(&s.to_lowercase()).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Check every entry; each issue is also logged as a warning.
pub fn validate_entries(entries: &[VocabularyEntry]) -> Vec<EntryIssue> {
  let mut issues = Vec::new();
  let mut seen = HashSet::new();

  for e in entries {
    if !seen.insert(e.id.as_str()) {
      issues.push(EntryIssue::DuplicateId { id: e.id.clone() });
    }
    if !e.hanzi.chars().any(is_cjk) {
      issues.push(EntryIssue::NonHanzi { id: e.id.clone(), hanzi: e.hanzi.clone() });
    }
    if e.pinyin.trim().is_empty() {
      issues.push(EntryIssue::EmptyPinyin { id: e.id.clone(), suggestion: suggest_pinyin(&e.hanzi) });
      continue;
    }
    if !e.numeric.trim().is_empty() {
      let rendered = numeric_to_diacritic(&e.numeric);
      if comparable(&rendered) != comparable(&e.pinyin) {
        issues.push(EntryIssue::NumericMismatch {
          id: e.id.clone(),
          numeric_rendered: rendered,
          pinyin: e.pinyin.clone(),
        });
      }
    }
    for (hanzi, syllable) in unknown_readings(&e.hanzi, &e.pinyin) {
      issues.push(EntryIssue::UnknownReading { id: e.id.clone(), hanzi, syllable });
    }
  }

  for issue in &issues {
    warn!(target: "vocab", ?issue, "Word list entry needs attention");
  }
  issues
}

/// Distinct series numbers, ascending.
pub fn series_list(entries: &[VocabularyEntry]) -> Vec<i64> {
  entries.iter().filter_map(|e| e.series).collect::<BTreeSet<_>>().into_iter().collect()
}

pub fn filter_by_series(entries: &[VocabularyEntry], filter: &SeriesFilter) -> Vec<VocabularyEntry> {
  entries.iter().filter(|e| filter.matches(e)).cloned().collect()
}
