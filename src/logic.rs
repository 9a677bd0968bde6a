//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Pinyin conversion and one-off answer checks
//!   - Word lists, multiple-choice sets and homophones for a series subset
//!   - Quiz session lifecycle (start, next, answer, restart, replay errors)
//!   - Audio source resolution and download bookkeeping

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::audio::{record_download, resolve_audio, AudioSource};
use crate::domain::{SeriesFilter, VocabularyEntry};
use crate::error::{ApiError, ApiResult, SessionError};
use crate::index::PinyinIndex;
use crate::matching::{check_french_answer, check_pinyin_answer, format_for_display, MatchVerdict};
use crate::protocol::{HomophonesOut, SessionOut};
use crate::sampling::sample_choices;
use crate::session::{Answer, Feedback, QuizSettings, Session};
use crate::state::AppState;
use crate::tones::numeric_to_diacritic;
use crate::util::trunc_for_log;

fn rng() -> StdRng {
  StdRng::from_entropy()
}

#[instrument(level = "info", skip(text), fields(text_len = text.len()))]
pub fn do_convert(text: &str) -> String {
  let out = numeric_to_diacritic(text);
  debug!(target: "hanzi_drill", text = %trunc_for_log(text, 64), out = %trunc_for_log(&out, 64), "numeric → diacritic");
  out
}

#[instrument(level = "info", skip(answer, expected), fields(answer_len = answer.len()))]
pub fn do_check_pinyin(answer: &str, expected: &str) -> MatchVerdict {
  let verdict = check_pinyin_answer(answer, expected);
  debug!(target: "quiz", answer = %trunc_for_log(answer, 64), %expected, matched = verdict.matched, "pinyin check");
  verdict
}

#[instrument(level = "info", skip(answer, expected), fields(answer_len = answer.len()))]
pub fn do_check_french(answer: &str, expected: &str) -> (bool, String) {
  let correct = check_french_answer(answer, expected);
  debug!(target: "quiz", answer = %trunc_for_log(answer, 64), %expected, %correct, "french check");
  (correct, format_for_display(expected))
}

fn find_entry<'a>(state: &'a AppState, id: &str) -> ApiResult<&'a VocabularyEntry> {
  state.entry(id).ok_or_else(|| ApiError::NotFound(format!("word {id}")))
}

/// Multiple-choice set for `word_id`, distractors drawn from the series subset.
#[instrument(level = "info", skip(state, filter), fields(%word_id))]
pub fn do_choices(state: &AppState, word_id: &str, filter: &SeriesFilter, count: Option<usize>) -> ApiResult<Vec<VocabularyEntry>> {
  let correct = find_entry(state, word_id)?;
  let pool = state.subset(filter);
  let count = count.unwrap_or(state.config.quiz.choice_count);
  Ok(sample_choices(correct, &pool, count, &mut rng()))
}

/// Entries sharing `word_id`'s pronunciation within the series subset.
#[instrument(level = "info", skip(state, filter), fields(%word_id))]
pub fn do_homophones(state: &AppState, word_id: &str, filter: &SeriesFilter) -> ApiResult<HomophonesOut> {
  let entry = find_entry(state, word_id)?;
  let pool = state.subset(filter);
  let accepted = PinyinIndex::build(&pool).accepted_ids_for(entry);
  let mut hanzi = vec![entry.hanzi.clone()];
  for e in pool.iter().filter(|e| accepted.contains(&e.id)) {
    if !hanzi.contains(&e.hanzi) {
      hanzi.push(e.hanzi.clone());
    }
  }
  Ok(HomophonesOut { id: entry.id.clone(), accepted_ids: accepted.into_iter().collect(), hanzi })
}

async fn with_session<T>(
  state: &AppState,
  session_id: &str,
  f: impl FnOnce(&mut Session) -> Result<T, SessionError>,
) -> ApiResult<T> {
  let mut sessions = state.sessions.write().await;
  let session = sessions
    .get_mut(session_id)
    .ok_or_else(|| ApiError::NotFound(format!("session {session_id}")))?;
  session.last_active = Instant::now();
  Ok(f(session)?)
}

fn advance(session: &mut Session) -> SessionOut {
  let question = session.next_question(&mut rng());
  SessionOut { session_id: session.id.clone(), question, summary: session.summary() }
}

#[instrument(level = "info", skip(state, settings))]
pub async fn start_session(state: &AppState, settings: QuizSettings) -> ApiResult<SessionOut> {
  let id = Uuid::new_v4().to_string();
  let mut session = Session::start(id, &state.entries, settings, &state.config.quiz, &mut rng())?;
  let out = advance(&mut session);
  state.insert_session(session).await;
  info!(target: "quiz", id = %out.session_id, "Session created");
  Ok(out)
}

#[instrument(level = "info", skip(state))]
pub async fn next_question(state: &AppState, session_id: &str) -> ApiResult<SessionOut> {
  with_session(state, session_id, |s| Ok(advance(s))).await
}

#[instrument(level = "info", skip(state, answer))]
pub async fn submit_answer(state: &AppState, session_id: &str, answer: &Answer) -> ApiResult<Feedback> {
  with_session(state, session_id, |s| s.submit(answer)).await
}

#[instrument(level = "info", skip(state))]
pub async fn restart_session(state: &AppState, session_id: &str) -> ApiResult<SessionOut> {
  with_session(state, session_id, |s| {
    s.restart(&mut rng());
    Ok(advance(s))
  })
  .await
}

#[instrument(level = "info", skip(state))]
pub async fn replay_errors(state: &AppState, session_id: &str) -> ApiResult<SessionOut> {
  with_session(state, session_id, |s| {
    s.replay_errors(&mut rng())?;
    Ok(advance(s))
  })
  .await
}

#[instrument(level = "info", skip(state))]
pub async fn end_session(state: &AppState, session_id: &str) -> ApiResult<()> {
  if !state.remove_session(session_id).await {
    return Err(ApiError::NotFound(format!("session {session_id}")));
  }
  info!(target: "quiz", id = %session_id, "Session ended");
  Ok(())
}

#[instrument(level = "info", skip(state))]
pub async fn audio_for(state: &AppState, word_id: &str) -> ApiResult<AudioSource> {
  let entry = find_entry(state, word_id)?;
  let mut cache = state.audio_cache.lock().await;
  Ok(resolve_audio(entry, &mut cache, &state.config.audio.tts_language))
}

#[instrument(level = "info", skip(state, file_uri))]
pub async fn audio_downloaded(state: &AppState, word_id: &str, file_uri: &str) -> ApiResult<Vec<String>> {
  let entry = find_entry(state, word_id)?;
  let mut cache = state.audio_cache.lock().await;
  let evicted = record_download(entry, file_uri, &mut cache)
    .ok_or_else(|| ApiError::BadRequest(format!("word {word_id} has no remote audio")))?;
  if !evicted.is_empty() {
    info!(target: "hanzi_drill", %word_id, evicted = evicted.len(), cached = cache.len(), "Audio cache evicted files");
  }
  Ok(evicted)
}
