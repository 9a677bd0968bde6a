//! Small utility helpers used across modules.

/// True if unicode char belongs to CJK ranges.
pub fn is_cjk(ch: char) -> bool {
  (ch >= '\u{4E00}' && ch <= '\u{9FFF}')
    || (ch >= '\u{3400}' && ch <= '\u{4DBF}')
    || (ch >= '\u{20000}' && ch <= '\u{2A6DF}')
    || (ch >= '\u{2A700}' && ch <= '\u{2B73F}')
    || (ch >= '\u{2B740}' && ch <= '\u{2B81F}')
    || (ch >= '\u{2B820}' && ch <= '\u{2CEAF}')
    || (ch >= '\u{F900}' && ch <= '\u{FAFF}')
}

/// Log-safe truncation for user-typed answers.
/// Cuts on a char boundary so Hanzi and diacritics never split.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) {
    end -= 1;
  }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cjk_ranges() {
    assert!(is_cjk('你'));
    assert!(!is_cjk('a'));
    assert!(!is_cjk('ǎ'));
  }

  #[test]
  fn truncation_respects_char_boundaries() {
    assert_eq!(trunc_for_log("nǐ", 10), "nǐ");
    // 'ǐ' spans bytes 1..3
    assert_eq!(trunc_for_log("nǐhǎo", 2), "n… (7 bytes total)");
  }
}
