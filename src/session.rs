//! Quiz sessions: a shuffled round of questions over a series subset, with
//! per-question modes, scoring, an error list and replay.
//!
//! A session owns the `PinyinIndex` of its subset; it is built once at start
//! since the subset never changes for the lifetime of the session.

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::QuizConfig;
use crate::domain::{QuestionMode, SeriesFilter, VocabularyEntry};
use crate::error::SessionError;
use crate::index::PinyinIndex;
use crate::matching::{check_french_answer, check_pinyin_answer, format_for_display, Advisory, MatchVerdict};
use crate::sampling::{pick_random, sample_choices, shuffle};
use crate::vocab::filter_by_series;

/// Share of correct answers needed for a round to count as passed.
const PASS_RATIO: f64 = 0.8;

#[derive(Clone, Debug)]
pub struct QuizSettings {
  pub series: SeriesFilter,
  pub max_questions: Option<usize>,
  pub modes: Vec<QuestionMode>,
  /// Never ask two consecutive questions in the same mode (when more than one is allowed).
  pub no_repeat_mode: bool,
}

impl Default for QuizSettings {
  fn default() -> Self {
    Self {
      series: SeriesFilter::All,
      max_questions: None,
      modes: QuestionMode::ALL.to_vec(),
      no_repeat_mode: true,
    }
  }
}

/// A tile of the multiple-choice grid.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct Choice {
  pub id: String,
  pub hanzi: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Question {
  pub number: usize,
  pub total: usize,
  pub mode: QuestionMode,
  pub prompt: String,
  pub choices: Vec<Choice>,
}

/// What the user submitted; each mode reads only the parts it needs.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Answer {
  #[serde(default)] pub french: Option<String>,
  #[serde(default)] pub pinyin: Option<String>,
  #[serde(default)] pub hanzi_id: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Solution {
  /// The expected hanzi first, then its homophones.
  pub hanzi: Vec<String>,
  pub pinyin: String,
  pub numeric: String,
  pub fr: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Feedback {
  pub correct: bool,
  pub french_ok: Option<bool>,
  pub pinyin: Option<MatchVerdict>,
  pub hanzi_ok: Option<bool>,
  pub messages: Vec<String>,
  pub solution: Solution,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
  pub score: u32,
  pub answered: usize,
  pub total: usize,
  pub passed: bool,
  pub finished: bool,
  pub wrong: Vec<VocabularyEntry>,
}

#[derive(Clone, Debug)]
struct Pending {
  question: Question,
  entry: VocabularyEntry,
  answered: bool,
}

#[derive(Debug)]
pub struct Session {
  pub id: String,
  /// Last time the session was started or used; idle sessions get swept.
  pub last_active: Instant,
  settings: QuizSettings,
  choice_count: usize,
  subset: Vec<VocabularyEntry>,
  index: PinyinIndex,
  round: Vec<VocabularyEntry>,
  queue: Vec<VocabularyEntry>,
  position: usize,
  current: Option<Pending>,
  last_mode: Option<QuestionMode>,
  score: u32,
  answered: usize,
  wrong: Vec<VocabularyEntry>,
  finished: bool,
}

impl Session {
  pub fn start<R: Rng + ?Sized>(
    id: String,
    entries: &[VocabularyEntry],
    mut settings: QuizSettings,
    cfg: &QuizConfig,
    rng: &mut R,
  ) -> Result<Self, SessionError> {
    let mut modes = Vec::new();
    for m in settings.modes.drain(..) {
      if !modes.contains(&m) { modes.push(m); }
    }
    if modes.is_empty() {
      return Err(SessionError::NoQuestionModes);
    }
    settings.modes = modes;

    let subset = filter_by_series(entries, &settings.series);
    if subset.len() < cfg.min_selection {
      return Err(SessionError::InsufficientSelection { found: subset.len(), required: cfg.min_selection });
    }

    let cap = settings.max_questions.filter(|&n| n > 0).unwrap_or(cfg.default_max_questions);
    let mut round = shuffle(&subset, rng);
    round.truncate(cap);

    let index = PinyinIndex::build(&subset);
    info!(target: "quiz", %id, subset = subset.len(), questions = round.len(), index_keys = index.len(), "Session started");

    Ok(Self {
      id,
      last_active: Instant::now(),
      settings,
      choice_count: cfg.choice_count,
      subset,
      index,
      queue: round.clone(),
      round,
      position: 0,
      current: None,
      last_mode: None,
      score: 0,
      answered: 0,
      wrong: Vec::new(),
      finished: false,
    })
  }

  fn choose_mode<R: Rng + ?Sized>(&self, rng: &mut R) -> QuestionMode {
    let modes = &self.settings.modes;
    let candidates: Vec<QuestionMode> = if self.settings.no_repeat_mode && modes.len() > 1 {
      modes.iter().copied().filter(|m| Some(*m) != self.last_mode).collect()
    } else {
      modes.clone()
    };
    pick_random(&candidates, rng).copied().unwrap_or(QuestionMode::Hanzi)
  }

  /// Advance to the next question. While the current question is unanswered
  /// it is returned again. `None` once the round is over.
  pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Question> {
    if let Some(p) = &self.current {
      if !p.answered {
        return Some(p.question.clone());
      }
    }

    let Some(entry) = self.queue.get(self.position).cloned() else {
      self.current = None;
      if !self.finished {
        info!(target: "quiz", id = %self.id, score = self.score, total = self.queue.len(), "Session finished");
      }
      self.finished = true;
      return None;
    };
    self.position += 1;

    let mode = self.choose_mode(rng);
    self.last_mode = Some(mode);

    let choices = if mode.expects_hanzi_choice() {
      sample_choices(&entry, &self.subset, self.choice_count, rng)
        .into_iter()
        .map(|e| Choice { id: e.id, hanzi: e.hanzi })
        .collect()
    } else {
      Vec::new()
    };

    let question = Question {
      number: self.position,
      total: self.queue.len(),
      mode,
      prompt: mode.prompt(&entry),
      choices,
    };
    debug!(target: "quiz", id = %self.id, number = question.number, ?mode, entry = %entry.id, "Question served");
    self.current = Some(Pending { question: question.clone(), entry, answered: false });
    Some(question)
  }

  /// Check the answer to the current question.
  pub fn submit(&mut self, answer: &Answer) -> Result<Feedback, SessionError> {
    let Some(pending) = self.current.as_mut() else {
      return Err(if self.finished { SessionError::Finished } else { SessionError::NoActiveQuestion });
    };
    if pending.answered {
      return Err(SessionError::AlreadyAnswered);
    }
    pending.answered = true;

    let entry = pending.entry.clone();
    let mode = pending.question.mode;
    let accepted = self.index.accepted_ids_for(&entry);
    let mut messages = Vec::new();

    let french_ok = mode.expects_french().then(|| {
      let ok = check_french_answer(answer.french.as_deref().unwrap_or(""), &entry.fr);
      if !ok {
        messages.push(format!("Traduction attendue : \"{}\"", format_for_display(&entry.fr)));
      }
      ok
    });

    let pinyin = mode.expects_pinyin().then(|| {
      let verdict = check_pinyin_answer(answer.pinyin.as_deref().unwrap_or(""), &entry.pinyin);
      if !verdict.matched {
        if verdict.has(Advisory::MissingToneMarkers) {
          messages.push("Le pinyin doit inclure les tons (accents ou chiffres).".to_string());
        }
        messages.push(format!("Pinyin attendu : \"{}\" (toléré en numérique : \"{}\")", entry.pinyin, entry.numeric));
      } else if verdict.has(Advisory::UsedNumericToneNotation) {
        messages.push(format!("✔ Pinyin correct (numérique). Forme accentuée : \"{}\".", verdict.corrected_display));
      }
      verdict
    });

    let hanzi_ok = mode.expects_hanzi_choice().then(|| {
      let ok = answer.hanzi_id.as_ref().map_or(false, |id| accepted.contains(id));
      if !ok {
        messages.push("Mauvais caractère choisi.".to_string());
      }
      ok
    });

    let correct = french_ok.unwrap_or(true)
      && pinyin.as_ref().map_or(true, |v| v.matched)
      && hanzi_ok.unwrap_or(true);

    self.answered += 1;
    if correct {
      self.score += 1;
    } else {
      self.wrong.push(entry.clone());
    }
    info!(target: "quiz", id = %self.id, entry = %entry.id, ?mode, %correct, "Answer checked");

    let mut hanzi = vec![entry.hanzi.clone()];
    for e in self.subset.iter().filter(|e| accepted.contains(&e.id)) {
      if !hanzi.contains(&e.hanzi) {
        hanzi.push(e.hanzi.clone());
      }
    }

    Ok(Feedback {
      correct,
      french_ok,
      pinyin,
      hanzi_ok,
      messages,
      solution: Solution {
        hanzi,
        pinyin: entry.pinyin.clone(),
        numeric: entry.numeric.clone(),
        fr: format_for_display(&entry.fr),
      },
    })
  }

  pub fn summary(&self) -> Summary {
    let total = self.queue.len();
    Summary {
      score: self.score,
      answered: self.answered,
      total,
      passed: total > 0 && f64::from(self.score) / total as f64 >= PASS_RATIO,
      finished: self.finished,
      wrong: self.wrong.clone(),
    }
  }

  fn reset_with<R: Rng + ?Sized>(&mut self, questions: &[VocabularyEntry], rng: &mut R) {
    self.queue = shuffle(questions, rng);
    self.position = 0;
    self.current = None;
    self.last_mode = None;
    self.score = 0;
    self.answered = 0;
    self.wrong.clear();
    self.finished = false;
  }

  /// Play the same round again, reshuffled.
  pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    let round = self.round.clone();
    self.reset_with(&round, rng);
    info!(target: "quiz", id = %self.id, questions = self.queue.len(), "Session restarted");
  }

  /// Play only the questions answered wrong in the current round.
  pub fn replay_errors<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
    if self.wrong.is_empty() {
      return Err(SessionError::NoErrorsToReplay);
    }
    let wrong = std::mem::take(&mut self.wrong);
    self.reset_with(&wrong, rng);
    info!(target: "quiz", id = %self.id, questions = self.queue.len(), "Replaying errors");
    Ok(())
  }
}

#[cfg(test)]
impl Session {
  fn current_entry(&self) -> Option<&VocabularyEntry> {
    self.current.as_ref().map(|p| &p.entry)
  }
}
