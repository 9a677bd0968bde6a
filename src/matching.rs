//! Answer matching for free-typed pinyin and French.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::tones::{has_diacritics, has_tone_digit, normalize_umlaut, numeric_to_diacritic};

/// Non-fatal information attached to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Correct, but typed with tone digits instead of diacritics.
    UsedNumericToneNotation,
    /// Wrong, and typed with no tone information at all.
    MissingToneMarkers,
}

/// Result of comparing a typed pinyin answer to the expected one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchVerdict {
    pub matched: bool,
    pub advisories: Vec<Advisory>,
    /// The raw input rendered with diacritics, for "you typed: …" feedback.
    pub corrected_display: String,
}

impl MatchVerdict {
    pub fn has(&self, advisory: Advisory) -> bool {
        self.advisories.contains(&advisory)
    }
}

/// Canonical comparison form: diacritics, no whitespace, lower-case, `ü`.
fn canonical_pinyin(s: &str) -> String {
    let marked = if has_tone_digit(s) { numeric_to_diacritic(s) } else { s.to_string() };
    let compact: String = marked.chars().filter(|c| !c.is_whitespace()).collect();
    normalize_umlaut(&compact.to_lowercase())
}

/// Compare a typed pinyin answer with the expected diacritic form.
///
/// Numeric input (`ni3 hao3`), case and spacing are tolerated; the match
/// itself is exact on the canonical form.
pub fn check_pinyin_answer(raw_input: &str, expected: &str) -> MatchVerdict {
    let matched = canonical_pinyin(raw_input) == canonical_pinyin(expected);
    let used_digits = has_tone_digit(raw_input);
    let used_marks = has_diacritics(raw_input);

    let mut advisories = Vec::new();
    if matched && used_digits && !used_marks {
        advisories.push(Advisory::UsedNumericToneNotation);
    }
    if !matched && !used_digits && !used_marks {
        advisories.push(Advisory::MissingToneMarkers);
    }

    MatchVerdict {
        matched,
        advisories,
        corrected_display: numeric_to_diacritic(raw_input),
    }
}

/// Normalize French text for comparison: lower-case, apostrophes as spaces,
/// accents stripped, whitespace collapsed.
pub fn normalize_french(s: &str) -> String {
    let lowered = s.trim().to_lowercase().replace(['\'', '’', '‘'], " ");
    let stripped: String = lowered
        .nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Accept a French answer if it equals one of the `/`-separated alternatives,
/// or all alternatives written out as one phrase. A `/` typed by the user
/// separates words the same way.
pub fn check_french_answer(raw_input: &str, expected: &str) -> bool {
    let input = normalize_french(&raw_input.replace('/', " "));
    if input.is_empty() {
        return false;
    }

    let alternatives: Vec<String> = expected
        .split('/')
        .map(normalize_french)
        .filter(|alt| !alt.is_empty())
        .collect();

    alternatives.iter().any(|alt| *alt == input)
        || (alternatives.len() > 1 && alternatives.join(" ") == input)
}

/// Human-readable gloss: alternatives separated by spaces.
pub fn format_for_display(expected: &str) -> String {
    expected.replace('/', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pinyin_uppercase_umlaut_input() {
        let v = check_pinyin_answer("LV4", "lǜ");
        assert!(v.matched);
        assert_eq!(v.advisories, vec![Advisory::UsedNumericToneNotation]);
        assert_eq!(v.corrected_display, "Lǜ");
        assert!(check_pinyin_answer("NU:3", "nǚ").matched);
    }

    #[test]
    fn test_pinyin_exact_diacritics() {
        let v = check_pinyin_answer("nǐ hǎo", "nǐ hǎo");
        assert!(v.matched);
        assert!(v.advisories.is_empty());
        assert_eq!(v.corrected_display, "nǐ hǎo");
    }

    #[test]
    fn test_pinyin_numeric_notation() {
        let v = check_pinyin_answer("ni3 hao3", "nǐ hǎo");
        assert_eq!(
            v,
            MatchVerdict {
                matched: true,
                advisories: vec![Advisory::UsedNumericToneNotation],
                corrected_display: "nǐ hǎo".into(),
            }
        );
    }

    #[test]
    fn test_pinyin_missing_tones() {
        let v = check_pinyin_answer("NI HAO", "nǐ hǎo");
        assert!(!v.matched);
        assert!(v.has(Advisory::MissingToneMarkers));
        assert_eq!(v.corrected_display, "NI HAO");
    }

    #[test]
    fn test_pinyin_wrong_tone_has_no_advisory() {
        let v = check_pinyin_answer("ni2 hao3", "nǐ hǎo");
        assert!(!v.matched);
        assert!(v.advisories.is_empty());
        assert_eq!(v.corrected_display, "ní hǎo");
    }

    #[test]
    fn test_pinyin_spacing_and_case() {
        assert!(check_pinyin_answer("NǏHǍO", "nǐ hǎo").matched);
        assert!(check_pinyin_answer("  nǐ   hǎo ", "nǐ hǎo").matched);
        assert!(check_pinyin_answer("Ni3 Hao3", "nǐ hǎo").matched);
    }

    #[test]
    fn test_pinyin_mixed_notation_has_no_numeric_advisory() {
        let v = check_pinyin_answer("nǐ hao3", "nǐ hǎo");
        assert!(v.matched);
        assert!(v.advisories.is_empty());
    }

    #[test]
    fn test_pinyin_umlaut_spellings() {
        assert!(check_pinyin_answer("lv4", "lǜ").matched);
        assert!(check_pinyin_answer("nu:3 er2", "nǚ ér").matched);
        assert!(check_pinyin_answer("lve4", "lüè").matched);
    }

    #[test]
    fn test_pinyin_ui_syllable() {
        assert!(check_pinyin_answer("dui4", "duì").matched);
        assert!(check_pinyin_answer("liu4", "liù").matched);
    }

    #[test]
    fn test_french_simple() {
        assert!(check_french_answer("bien", "bien"));
        assert!(check_french_answer("  BIEN ", "bien"));
        assert!(!check_french_answer("Bien!", "bien"));
        assert!(!check_french_answer("", "bien"));
    }

    #[test]
    fn test_french_alternatives() {
        assert!(check_french_answer("tu", "tu/toi"));
        assert!(check_french_answer("toi", "tu/toi"));
        assert!(check_french_answer("tu toi", "tu/toi"));
        assert!(check_french_answer("tu/toi", "tu/toi"));
        assert!(!check_french_answer("toi tu", "tu/toi"));
        assert!(!check_french_answer("vous", "tu/toi"));
    }

    #[test]
    fn test_french_accents_and_apostrophes() {
        assert!(check_french_answer("eleve", "élève"));
        assert!(check_french_answer("l'ecole", "l’école"));
        assert!(check_french_answer("l ecole", "l'école"));
        assert!(check_french_answer("pomme   de terre", "pomme de terre"));
    }

    #[test]
    fn test_french_ignores_empty_alternatives() {
        assert!(check_french_answer("tu", "tu/"));
        assert!(!check_french_answer(" ", "tu/"));
    }

    #[test]
    fn test_format_for_display() {
        assert_eq!(format_for_display("tu/toi"), "tu toi");
        assert_eq!(format_for_display("bien"), "bien");
    }
}
