//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::logic::*;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "hanzi_drill", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "hanzi_drill", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "hanzi_drill", "WS received: {:?}", &incoming);
            handle_client_ws(incoming, &state).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "hanzi_drill", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "hanzi_drill", "WebSocket disconnected");
}

pub(crate) async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Convert { text } => {
      let diacritic = do_convert(&text);
      ServerWsMessage::Converted { text, diacritic }
    }

    ClientWsMessage::CheckPinyin { answer, expected } => {
      ServerWsMessage::PinyinVerdict { verdict: do_check_pinyin(&answer, &expected) }
    }

    ClientWsMessage::CheckFrench { answer, expected } => {
      let (correct, display) = do_check_french(&answer, &expected);
      ServerWsMessage::FrenchVerdict { correct, display }
    }

    ClientWsMessage::StartSession { settings } => match start_session(state, settings.into()).await {
      Ok(session) => {
        tracing::info!(target: "quiz", id = %session.session_id, "WS session started");
        ServerWsMessage::Session { session }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::SubmitAnswer { session_id, answer } => match submit_answer(state, &session_id, &answer).await {
      Ok(feedback) => {
        tracing::info!(target: "quiz", id = %session_id, correct = feedback.correct, "WS answer evaluated");
        ServerWsMessage::AnswerResult { feedback }
      }
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::NextQuestion { session_id } => match next_question(state, &session_id).await {
      Ok(session) => ServerWsMessage::Session { session },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  }
}
