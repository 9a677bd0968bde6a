//! Numeric-tone ⇄ diacritic pinyin.
//!
//! Example:
//!   input:  "ni3 hao3 lv4"
//!   output: "nǐ hǎo lǜ"
//!
//! Tone placement follows the usual orthography rule: `a` or `e` if present,
//! otherwise the `o` of `ou`, otherwise the second vowel of `iu`/`ui`,
//! otherwise the last vowel.

const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'ü'];

/// Tone 1..=4 variants per base vowel.
static TONE_MARKS: [(char, [char; 4]); 6] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
];

const MARKED_VOWELS: &str = "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜ";

/// True if the text carries at least one tone diacritic.
pub fn has_diacritics(s: &str) -> bool {
    s.chars().any(|c| MARKED_VOWELS.contains(c))
}

/// True if the text carries a tone digit (1-5).
pub fn has_tone_digit(s: &str) -> bool {
    s.chars().any(|c| ('1'..='5').contains(&c))
}

/// Rewrite the ASCII spellings of ü (`v`, `u:`) to `ü`.
pub fn normalize_umlaut(s: &str) -> String {
    s.replace("u:", "ü")
        .replace("U:", "Ü")
        .replace('v', "ü")
        .replace('V', "Ü")
}

fn tone_mark(vowel: char, tone: u8) -> Option<char> {
    TONE_MARKS
        .iter()
        .find(|(base, _)| *base == vowel)
        .map(|(_, marks)| marks[usize::from(tone - 1)])
}

/// Index (in chars) of the vowel that carries the tone, if any.
fn tone_target(lower: &[char]) -> Option<usize> {
    let find = |c: char| lower.iter().position(|&x| x == c);
    let find_pair = |a: char, b: char| lower.windows(2).position(|w| w[0] == a && w[1] == b);

    find('a')
        .or_else(|| find('e'))
        .or_else(|| find_pair('o', 'u').and_then(|_| find('o')))
        .or_else(|| find_pair('i', 'u').map(|i| i + 1))
        .or_else(|| find_pair('u', 'i').map(|i| i + 1))
        .or_else(|| lower.iter().rposition(|c| VOWELS.contains(c)))
}

/// Put the diacritic for `tone` on the right vowel of `syllable`.
///
/// Tones 0 and 5 (neutral) and out-of-range tones leave the syllable as is.
/// A syllable without any vowel is returned unmodified. The inserted mark is
/// always lower-case, even when the vowel it replaces was upper-case.
pub fn mark_tone(syllable: &str, tone: u8) -> String {
    if !(1..=4).contains(&tone) {
        return syllable.to_string();
    }

    let chars: Vec<char> = normalize_umlaut(syllable).chars().collect();
    // Map char by char so indices line up with `chars`.
    let lower: Vec<char> = chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let Some(idx) = tone_target(&lower) else {
        return syllable.to_string();
    };
    let Some(marked) = tone_mark(lower[idx], tone) else {
        return syllable.to_string();
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, c)| if i == idx { marked } else { *c })
        .collect()
}

/// Convert one syllable with an optional trailing tone digit (`hao3`).
/// Without a digit the syllable is taken as already marked and only its
/// umlaut spelling is normalized.
pub fn numeric_syllable_to_diacritic(syllable: &str) -> String {
    let mut chars = syllable.chars();
    match chars.next_back().and_then(|c| c.to_digit(10)) {
        Some(tone) if tone <= 5 => {
            let base = normalize_umlaut(chars.as_str());
            // `tone` is at most 5 here.
            mark_tone(&base, tone as u8)
        }
        _ => normalize_umlaut(syllable),
    }
}

/// Convert a whitespace-separated pinyin string, syllable by syllable.
/// Tokens are re-joined with single spaces.
pub fn numeric_to_diacritic(text: &str) -> String {
    text.split_whitespace()
        .map(numeric_syllable_to_diacritic)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_a_and_e_first() {
        assert_eq!(mark_tone("hao", 3), "hǎo");
        assert_eq!(mark_tone("xie", 4), "xiè");
        assert_eq!(mark_tone("guai", 1), "guāi");
        assert_eq!(mark_tone("lüe", 4), "lüè");
    }

    #[test]
    fn ou_marks_the_o() {
        assert_eq!(mark_tone("gou", 3), "gǒu");
        assert_eq!(mark_tone("zhou", 1), "zhōu");
    }

    #[test]
    fn iu_and_ui_mark_the_second_vowel() {
        assert_eq!(mark_tone("niu", 2), "niú");
        assert_eq!(mark_tone("liu", 4), "liù");
        assert_eq!(mark_tone("hui", 4), "huì");
        assert_eq!(mark_tone("gui", 3), "guǐ");
    }

    #[test]
    fn falls_back_to_last_vowel() {
        assert_eq!(mark_tone("ni", 3), "nǐ");
        assert_eq!(mark_tone("zhong", 1), "zhōng");
        assert_eq!(mark_tone("guo", 2), "guó");
        assert_eq!(mark_tone("lü", 4), "lǜ");
    }

    #[test]
    fn neutral_and_invalid_tones_are_passthrough() {
        assert_eq!(mark_tone("ma", 0), "ma");
        assert_eq!(mark_tone("ma", 5), "ma");
        assert_eq!(mark_tone("ma", 9), "ma");
    }

    #[test]
    fn no_vowel_is_returned_unmodified() {
        assert_eq!(mark_tone("hm", 4), "hm");
        assert_eq!(mark_tone("", 2), "");
    }

    #[test]
    fn uppercase_keeps_case_but_mark_is_lowercase() {
        assert_eq!(mark_tone("HAO", 3), "HǎO");
        assert_eq!(mark_tone("Ni", 3), "Nǐ");
    }

    #[test]
    fn umlaut_spellings() {
        assert_eq!(numeric_syllable_to_diacritic("lv4"), "lǜ");
        assert_eq!(numeric_syllable_to_diacritic("nu:3"), "nǚ");
        assert_eq!(numeric_syllable_to_diacritic("lve4"), "lüè");
        assert_eq!(numeric_syllable_to_diacritic("lüe4"), "lüè");
        assert_eq!(numeric_syllable_to_diacritic("lv5"), "lü");
    }

    #[test]
    fn uppercase_umlaut_spellings() {
        assert_eq!(normalize_umlaut("NU:"), "NÜ");
        assert_eq!(normalize_umlaut("LVE"), "LÜE");
        assert_eq!(numeric_syllable_to_diacritic("LV4"), "Lǜ");
        assert_eq!(numeric_syllable_to_diacritic("NU:3"), "Nǚ");
    }

    #[test]
    fn syllable_without_digit_is_kept() {
        assert_eq!(numeric_syllable_to_diacritic("nǐ"), "nǐ");
        assert_eq!(numeric_syllable_to_diacritic("hao"), "hao");
        assert_eq!(numeric_syllable_to_diacritic("ma0"), "ma");
    }

    #[test]
    fn converts_whole_strings() {
        assert_eq!(numeric_to_diacritic("ni3 hao3"), "nǐ hǎo");
        assert_eq!(numeric_to_diacritic("  zhong1   guo2 "), "zhōng guó");
        assert_eq!(numeric_to_diacritic("xie4 xie5"), "xiè xie");
        assert_eq!(numeric_to_diacritic(""), "");
    }

    #[test]
    fn diacritic_input_is_idempotent() {
        for s in ["nǐ hǎo", "zhōng guó", "xué", "lǜ", "niú huì"] {
            assert_eq!(numeric_to_diacritic(s), s);
        }
    }

    #[test]
    fn round_trips_common_syllables() {
        let cases = [
            ("ni3", "nǐ"),
            ("hao3", "hǎo"),
            ("wo3", "wǒ"),
            ("ai4", "ài"),
            ("ren2", "rén"),
            ("xue2", "xué"),
            ("yu3", "yǔ"),
            ("dui4", "duì"),
            ("jiu3", "jiǔ"),
            ("lou2", "lóu"),
            ("er4", "èr"),
        ];
        for (numeric, marked) in cases {
            assert_eq!(numeric_syllable_to_diacritic(numeric), marked, "{numeric}");
        }
    }

    #[test]
    fn detects_notation() {
        assert!(has_tone_digit("ni3"));
        assert!(!has_tone_digit("ni0"));
        assert!(!has_tone_digit("nǐ"));
        assert!(has_diacritics("nǐ hao"));
        assert!(!has_diacritics("ni hao"));
    }
}
