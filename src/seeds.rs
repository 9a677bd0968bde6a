//! Built-in word list that guarantees the drill is usable without a data file.

use crate::domain::VocabularyEntry;

/// Ten everyday words, in two series of five.
pub fn seed_entries() -> Vec<VocabularyEntry> {
  [
    ("1", "你", "nǐ", "ni3", "tu/toi", 1),
    ("2", "好", "hǎo", "hao3", "bien", 1),
    ("3", "我", "wǒ", "wo3", "je/moi", 1),
    ("4", "爱", "ài", "ai4", "aimer", 1),
    ("5", "人", "rén", "ren2", "personne", 1),
    ("6", "中", "zhōng", "zhong1", "milieu", 2),
    ("7", "国", "guó", "guo2", "pays", 2),
    ("8", "学", "xué", "xue2", "apprendre", 2),
    ("9", "语", "yǔ", "yu3", "langue", 2),
    ("10", "谢", "xiè", "xie4", "remercier", 2),
  ]
  .into_iter()
  .map(|(id, hanzi, pinyin, numeric, fr, series)| {
    VocabularyEntry::new(id, hanzi, pinyin, numeric, fr).with_series(series)
  })
  .collect()
}
