//! Random selection helpers. Every function takes the random source as an
//! argument so callers can pass a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::VocabularyEntry;

/// Default size of a multiple-choice set.
pub const DEFAULT_CHOICE_COUNT: usize = 5;

/// Uniformly shuffled copy of `items`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
  let mut out = items.to_vec();
  out.shuffle(rng);
  out
}

pub fn pick_random<'a, T, R: Rng + ?Sized>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
  items.choose(rng)
}

/// Build a multiple-choice set: up to `count - 1` distractors from `pool`
/// plus `correct`, in random order. A small pool gives a smaller set.
pub fn sample_choices<R: Rng + ?Sized>(
  correct: &VocabularyEntry,
  pool: &[VocabularyEntry],
  count: usize,
  rng: &mut R,
) -> Vec<VocabularyEntry> {
  let others: Vec<VocabularyEntry> = pool.iter().filter(|e| e.id != correct.id).cloned().collect();
  let mut choices = shuffle(&others, rng);
  choices.truncate(count.saturating_sub(1));
  choices.push(correct.clone());
  choices.shuffle(rng);
  choices
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn pool(n: usize) -> Vec<VocabularyEntry> {
    (0..n)
      .map(|i| VocabularyEntry::new(&i.to_string(), "字", "zì", "zi4", "caractère"))
      .collect()
  }

  #[test]
  fn full_pool_gives_five_with_correct_once() {
    let words = pool(12);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
      let choices = sample_choices(&words[3], &words, DEFAULT_CHOICE_COUNT, &mut rng);
      assert_eq!(choices.len(), 5);
      assert_eq!(choices.iter().filter(|e| e.id == "3").count(), 1);
      let mut ids: Vec<&str> = choices.iter().map(|e| e.id.as_str()).collect();
      ids.sort();
      ids.dedup();
      assert_eq!(ids.len(), 5);
    }
  }

  #[test]
  fn small_pool_underfills() {
    let words = pool(3);
    let mut rng = StdRng::seed_from_u64(1);
    let choices = sample_choices(&words[0], &words, 5, &mut rng);
    assert_eq!(choices.len(), 3);
  }

  #[test]
  fn two_word_scenario() {
    let words = vec![
      VocabularyEntry::new("1", "你", "nǐ", "ni3", "tu"),
      VocabularyEntry::new("2", "好", "hǎo", "hao3", "bien"),
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let choices = sample_choices(&words[0], &words, 5, &mut rng);
    assert_eq!(choices.len(), 2);
    assert!(choices.iter().any(|e| e.id == "1"));
    assert!(choices.iter().any(|e| e.id == "2"));
  }

  #[test]
  fn correct_position_is_spread_out() {
    let words = pool(10);
    let mut rng = StdRng::seed_from_u64(2024);
    let mut seen = [0usize; 5];
    for _ in 0..2000 {
      let choices = sample_choices(&words[0], &words, 5, &mut rng);
      if let Some(pos) = choices.iter().position(|e| e.id == "0") {
        seen[pos] += 1;
      }
    }
    // 400 expected per slot
    assert!(seen.iter().all(|&n| n > 300 && n < 500), "{seen:?}");
  }

  #[test]
  fn seeded_runs_are_reproducible() {
    let words = pool(8);
    let a = sample_choices(&words[1], &words, 5, &mut StdRng::seed_from_u64(9));
    let b = sample_choices(&words[1], &words, 5, &mut StdRng::seed_from_u64(9));
    assert_eq!(a, b);
  }

  #[test]
  fn shuffle_keeps_elements() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut s = shuffle(&[1, 2, 3, 4, 5], &mut rng);
    s.sort();
    assert_eq!(s, vec![1, 2, 3, 4, 5]);
    assert_eq!(pick_random::<i32, _>(&[], &mut rng), None);
    assert_eq!(pick_random(&[8], &mut rng), Some(&8));
  }
}
