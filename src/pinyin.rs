//! Dictionary readings of Hanzi, used to sanity-check authored word data.
//!
//! Example:
//!   readings_of('好') → ["hǎo", "hào"]
//!   suggest_pinyin("中国") → "zhōng guó"
use pinyin::{ToPinyin, ToPinyinMulti};

use crate::tones::normalize_umlaut;
use crate::util::is_cjk;

/// Every tone-marked reading the dictionary knows for `ch` (empty for non-Hanzi).
pub fn readings_of(ch: char) -> Vec<&'static str> {
    match ch.to_pinyin_multi() {
        Some(multi) => multi.into_iter().map(|p| p.with_tone()).collect(),
        None => Vec::new(),
    }
}

/// Default reading of each Hanzi, space-separated; other characters are dropped.
///
/// Per-character and without word segmentation, so polyphonic characters get
/// their most common reading.
pub fn suggest_pinyin(hanzi: &str) -> String {
    hanzi
        .chars()
        .filter_map(|ch| ch.to_pinyin())
        .map(|py| py.with_tone())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pairs (character, syllable) where the syllable is not one of the
/// character's known readings.
///
/// Only checked when the Hanzi count equals the syllable count; otherwise the
/// two cannot be aligned and nothing is reported.
pub fn unknown_readings(hanzi: &str, pinyin: &str) -> Vec<(char, String)> {
    let chars: Vec<char> = hanzi.chars().filter(|c| is_cjk(*c)).collect();
    let syllables: Vec<String> = pinyin
        .split_whitespace()
        .map(|s| normalize_umlaut(&s.to_lowercase()))
        .collect();
    if chars.len() != syllables.len() {
        return Vec::new();
    }

    chars
        .into_iter()
        .zip(syllables)
        .filter(|(ch, syl)| {
            let known = readings_of(*ch);
            // Characters missing from the dictionary are not reported.
            !known.is_empty() && !known.iter().any(|r| *r == syl.as_str())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_readings_pass() {
        assert!(unknown_readings("你好", "nǐ hǎo").is_empty());
        assert!(unknown_readings("中国", "Zhōng guó").is_empty());
    }

    #[test]
    fn wrong_reading_is_reported() {
        let bad = unknown_readings("你好", "nǐ mā");
        assert_eq!(bad, vec![('好', "mā".to_string())]);
    }

    #[test]
    fn unaligned_text_is_not_checked() {
        assert!(unknown_readings("你好", "nǐ").is_empty());
        assert!(unknown_readings("abc", "").is_empty());
    }

    #[test]
    fn polyphonic_characters_have_several_readings() {
        assert!(readings_of('好').len() >= 2);
        assert!(readings_of('a').is_empty());
    }

    #[test]
    fn suggestion_skips_non_hanzi() {
        assert_eq!(suggest_pinyin("中国!"), "zhōng guó");
    }
}
