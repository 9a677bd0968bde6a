//! Error types for word loading, quiz sessions and the HTTP API.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure to read or parse a word list.
#[derive(Debug, Error)]
pub enum VocabError {
  #[error("cannot read word list {path}: {source}")]
  Io { path: String, #[source] source: std::io::Error },

  #[error("invalid word list {path}: {source}")]
  Json { path: String, #[source] source: serde_json::Error },
}

/// Quiz session state errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
  #[error("selection has {found} entries, at least {required} are needed")]
  InsufficientSelection { found: usize, required: usize },

  #[error("no question type selected")]
  NoQuestionModes,

  #[error("no question is waiting for an answer")]
  NoActiveQuestion,

  #[error("question already answered")]
  AlreadyAnswered,

  #[error("no wrong answers to replay")]
  NoErrorsToReplay,

  #[error("session is finished")]
  Finished,
}

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Bad request: {0}")]
  BadRequest(String),

  #[error("Session error: {0}")]
  Session(#[from] SessionError),
}

#[derive(Serialize)]
struct ErrorResponse {
  error: String,
  message: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, error_type) = match &self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
      ApiError::Session(SessionError::InsufficientSelection { .. })
      | ApiError::Session(SessionError::NoQuestionModes) => (StatusCode::BAD_REQUEST, "invalid_settings"),
      ApiError::Session(_) => (StatusCode::CONFLICT, "session_state"),
    };

    let body = Json(ErrorResponse {
      error: error_type.to_string(),
      message: self.to_string(),
    });

    (status, body).into_response()
  }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_not_found_status() {
    let response = ApiError::NotFound("session abc".into()).into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn test_settings_errors_are_bad_requests() {
    let err: ApiError = SessionError::InsufficientSelection { found: 3, required: 5 }.into();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    let err: ApiError = SessionError::NoQuestionModes.into();
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_state_errors_are_conflicts() {
    let err: ApiError = SessionError::AlreadyAnswered.into();
    assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
  }

  #[test]
  fn test_error_display() {
    let err = SessionError::InsufficientSelection { found: 3, required: 5 };
    assert_eq!(err.to_string(), "selection has 3 entries, at least 5 are needed");
    assert_eq!(ApiError::BadRequest("missing field".into()).to_string(), "Bad request: missing field");
  }
}
