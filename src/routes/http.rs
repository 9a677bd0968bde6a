//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and log include parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, http::StatusCode, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::audio::AudioSource;
use crate::error::ApiResult;
use crate::logic::*;
use crate::matching::MatchVerdict;
use crate::protocol::*;
use crate::session::{Answer, Feedback};
use crate::state::AppState;
use crate::vocab::series_list;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_words(
  State(state): State<Arc<AppState>>,
  Query(q): Query<SeriesQuery>,
) -> Json<WordsOut> {
  let words = state.subset(&q.filter());
  info!(target: "hanzi_drill", count = words.len(), "HTTP words served");
  Json(WordsOut { words })
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_series(State(state): State<Arc<AppState>>) -> Json<SeriesOut> {
  Json(SeriesOut { series: series_list(&state.entries) })
}

#[instrument(level = "info", skip(body), fields(text_len = body.text.len()))]
pub async fn http_post_convert(Json(body): Json<ConvertIn>) -> Json<ConvertOut> {
  Json(ConvertOut { diacritic: do_convert(&body.text) })
}

#[instrument(level = "info", skip(body), fields(answer_len = body.answer.len()))]
pub async fn http_post_check_pinyin(Json(body): Json<CheckIn>) -> Json<MatchVerdict> {
  Json(do_check_pinyin(&body.answer, &body.expected))
}

#[instrument(level = "info", skip(body), fields(answer_len = body.answer.len()))]
pub async fn http_post_check_french(Json(body): Json<CheckIn>) -> Json<CheckFrenchOut> {
  let (correct, display) = do_check_french(&body.answer, &body.expected);
  Json(CheckFrenchOut { correct, display })
}

#[instrument(level = "info", skip(state, body), fields(word_id = %body.word_id))]
pub async fn http_post_choices(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChoicesIn>,
) -> ApiResult<Json<ChoicesOut>> {
  let filter = SeriesQuery { series: body.series }.filter();
  let choices = do_choices(&state, &body.word_id, &filter, body.count)?;
  Ok(Json(ChoicesOut { choices }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_homophones(
  State(state): State<Arc<AppState>>,
  Path(word_id): Path<String>,
  Query(q): Query<SeriesQuery>,
) -> ApiResult<Json<HomophonesOut>> {
  Ok(Json(do_homophones(&state, &word_id, &q.filter())?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionSettingsIn>,
) -> ApiResult<Json<SessionOut>> {
  let out = start_session(&state, body.into()).await?;
  info!(target: "quiz", id = %out.session_id, total = out.summary.total, "HTTP session started");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
  Json(body): Json<Answer>,
) -> ApiResult<Json<Feedback>> {
  let feedback = submit_answer(&state, &session_id, &body).await?;
  info!(target: "quiz", id = %session_id, correct = feedback.correct, "HTTP answer evaluated");
  Ok(Json(feedback))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_next(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> ApiResult<Json<SessionOut>> {
  Ok(Json(next_question(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_restart(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> ApiResult<Json<SessionOut>> {
  Ok(Json(restart_session(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_replay_errors(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> ApiResult<Json<SessionOut>> {
  Ok(Json(replay_errors(&state, &session_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
  end_session(&state, &session_id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_audio(
  State(state): State<Arc<AppState>>,
  Path(word_id): Path<String>,
) -> ApiResult<Json<AudioSource>> {
  Ok(Json(audio_for(&state, &word_id).await?))
}

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_audio_downloaded(
  State(state): State<Arc<AppState>>,
  Path(word_id): Path<String>,
  Json(body): Json<DownloadedIn>,
) -> ApiResult<Json<DownloadedOut>> {
  let evicted = audio_downloaded(&state, &word_id, &body.file_uri).await?;
  Ok(Json(DownloadedOut { evicted }))
}
