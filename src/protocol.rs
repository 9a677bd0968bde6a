//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::{QuestionMode, SeriesFilter, VocabularyEntry};
use crate::matching::MatchVerdict;
use crate::session::{Answer, Feedback, Question, QuizSettings, Summary};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Convert {
        text: String,
    },
    CheckPinyin {
        answer: String,
        expected: String,
    },
    CheckFrench {
        answer: String,
        expected: String,
    },
    StartSession {
        #[serde(default)]
        settings: SessionSettingsIn,
    },
    SubmitAnswer {
        #[serde(rename = "sessionId")]
        session_id: String,
        answer: Answer,
    },
    NextQuestion {
        #[serde(rename = "sessionId")]
        session_id: String,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Converted {
        text: String,
        diacritic: String,
    },
    PinyinVerdict {
        verdict: MatchVerdict,
    },
    FrenchVerdict {
        correct: bool,
        display: String,
    },
    Session {
        session: SessionOut,
    },
    AnswerResult {
        feedback: Feedback,
    },
    Error {
        message: String,
    },
}

//
// HTTP request/response DTOs
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct SeriesQuery {
    /// "all" or comma-separated series numbers.
    pub series: Option<String>,
}

impl SeriesQuery {
    pub fn filter(&self) -> SeriesFilter {
        self.series.as_deref().map(SeriesFilter::parse).unwrap_or_default()
    }
}

#[derive(Serialize)]
pub struct WordsOut {
    pub words: Vec<VocabularyEntry>,
}

#[derive(Serialize)]
pub struct SeriesOut {
    pub series: Vec<i64>,
}

#[derive(Deserialize)]
pub struct ConvertIn {
    pub text: String,
}
#[derive(Serialize)]
pub struct ConvertOut {
    pub diacritic: String,
}

#[derive(Deserialize)]
pub struct CheckIn {
    pub answer: String,
    pub expected: String,
}

#[derive(Serialize)]
pub struct CheckFrenchOut {
    pub correct: bool,
    pub display: String,
}

#[derive(Deserialize)]
pub struct ChoicesIn {
    #[serde(rename = "wordId")]
    pub word_id: String,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub count: Option<usize>,
}
#[derive(Serialize)]
pub struct ChoicesOut {
    pub choices: Vec<VocabularyEntry>,
}

#[derive(Serialize)]
pub struct HomophonesOut {
    pub id: String,
    pub accepted_ids: Vec<String>,
    pub hanzi: Vec<String>,
}

/// Session settings as sent by the client; omitted fields take defaults.
#[derive(Debug, Deserialize, Default)]
pub struct SessionSettingsIn {
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default, rename = "maxQuestions")]
    pub max_questions: Option<usize>,
    #[serde(default)]
    pub modes: Option<Vec<QuestionMode>>,
    #[serde(default, rename = "noRepeatMode")]
    pub no_repeat_mode: Option<bool>,
}

impl From<SessionSettingsIn> for QuizSettings {
    fn from(s: SessionSettingsIn) -> Self {
        let defaults = QuizSettings::default();
        QuizSettings {
            series: s.series.as_deref().map(SeriesFilter::parse).unwrap_or_default(),
            max_questions: s.max_questions,
            modes: s.modes.unwrap_or(defaults.modes),
            no_repeat_mode: s.no_repeat_mode.unwrap_or(defaults.no_repeat_mode),
        }
    }
}

/// Session state after start/next/restart/replay: the pending question (if
/// any) and the running summary.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub session_id: String,
    pub question: Option<Question>,
    pub summary: Summary,
}

#[derive(Deserialize)]
pub struct DownloadedIn {
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}
#[derive(Serialize)]
pub struct DownloadedOut {
    /// Local files the client should delete.
    pub evicted: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_defaults() {
        let s: QuizSettings = SessionSettingsIn::default().into();
        assert_eq!(s.series, SeriesFilter::All);
        assert_eq!(s.modes.len(), 3);
        assert!(s.no_repeat_mode);
    }

    #[test]
    fn settings_from_json() {
        let raw = r#"{"series":"1,2","maxQuestions":4,"modes":["pinyin"],"noRepeatMode":false}"#;
        let s: QuizSettings = serde_json::from_str::<SessionSettingsIn>(raw).unwrap().into();
        assert_eq!(s.series, SeriesFilter::parse("1,2"));
        assert_eq!(s.max_questions, Some(4));
        assert_eq!(s.modes, vec![QuestionMode::Pinyin]);
        assert!(!s.no_repeat_mode);
    }

    #[test]
    fn ws_messages_parse() {
        let m: ClientWsMessage =
            serde_json::from_str(r#"{"type":"submit_answer","sessionId":"abc","answer":{"pinyin":"ni3"}}"#).unwrap();
        match m {
            ClientWsMessage::SubmitAnswer { session_id, answer } => {
                assert_eq!(session_id, "abc");
                assert_eq!(answer.pinyin.as_deref(), Some("ni3"));
            }
            other => panic!("unexpected {other:?}"),
        }
        let m: ClientWsMessage = serde_json::from_str(r#"{"type":"start_session"}"#).unwrap();
        assert!(matches!(m, ClientWsMessage::StartSession { .. }));
    }

    #[test]
    fn server_messages_are_tagged() {
        let out = serde_json::to_value(ServerWsMessage::FrenchVerdict { correct: true, display: "tu toi".into() }).unwrap();
        assert_eq!(out["type"], "french_verdict");
        assert_eq!(out["display"], "tu toi");
    }
}
