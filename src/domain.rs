//! Domain models: vocabulary entries, question modes, series filters.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One word of the vocabulary list. Loaded once and treated as read-only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
  pub id: String,
  #[serde(default)] pub series: Option<i64>,
  pub hanzi: String,
  pub pinyin: String,   // with tone marks: "nǐ hǎo"
  #[serde(default)] pub numeric: String,  // with tone digits: "ni3 hao3"
  pub fr: String,       // may hold "/"-separated alternatives
  #[serde(default, skip_serializing_if = "Option::is_none")] pub pinyin_details: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")] pub fr_details: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")] pub audio_url: Option<String>,
}

impl VocabularyEntry {
  /// Minimal constructor for the common fields; optional fields stay empty.
  pub fn new(id: &str, hanzi: &str, pinyin: &str, numeric: &str, fr: &str) -> Self {
    Self {
      id: id.into(),
      series: None,
      hanzi: hanzi.into(),
      pinyin: pinyin.into(),
      numeric: numeric.into(),
      fr: fr.into(),
      pinyin_details: None,
      fr_details: None,
      audio_url: None,
    }
  }

  pub fn with_series(mut self, series: i64) -> Self {
    self.series = Some(series);
    self
  }
}

/// Which side of the entry is shown as the prompt.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionMode {
  /// Hanzi shown; user types French + pinyin.
  Hanzi,
  /// Pinyin shown; user types French + picks the hanzi.
  Pinyin,
  /// French shown; user types pinyin + picks the hanzi.
  Translation,
}

impl QuestionMode {
  pub const ALL: [QuestionMode; 3] = [QuestionMode::Hanzi, QuestionMode::Pinyin, QuestionMode::Translation];

  pub fn expects_french(self) -> bool { matches!(self, QuestionMode::Hanzi | QuestionMode::Pinyin) }
  pub fn expects_pinyin(self) -> bool { matches!(self, QuestionMode::Hanzi | QuestionMode::Translation) }
  pub fn expects_hanzi_choice(self) -> bool { matches!(self, QuestionMode::Pinyin | QuestionMode::Translation) }

  /// The text shown to the user for `entry`.
  pub fn prompt(self, entry: &VocabularyEntry) -> String {
    match self {
      QuestionMode::Hanzi => entry.hanzi.clone(),
      QuestionMode::Pinyin => entry.pinyin.clone(),
      QuestionMode::Translation => crate::matching::format_for_display(&entry.fr),
    }
  }
}

/// Series selection: everything, or an explicit set of series numbers.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SeriesFilter {
  #[default]
  All,
  Only(BTreeSet<i64>),
}

impl SeriesFilter {
  /// Parse the query form: `"all"`, empty, or `"1,2,5"`. Unparseable parts are ignored.
  pub fn parse(s: &str) -> Self {
    let s = s.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("all") {
      return SeriesFilter::All;
    }
    let set: BTreeSet<i64> = s.split(',').filter_map(|p| p.trim().parse().ok()).collect();
    if set.is_empty() { SeriesFilter::All } else { SeriesFilter::Only(set) }
  }

  pub fn matches(&self, entry: &VocabularyEntry) -> bool {
    match self {
      SeriesFilter::All => true,
      SeriesFilter::Only(set) => entry.series.map_or(false, |s| set.contains(&s)),
    }
  }
}
