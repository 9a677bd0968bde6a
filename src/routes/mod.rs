//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static quiz front-end from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // Words and pinyin helpers
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/words", get(http::http_get_words))
        .route("/api/v1/series", get(http::http_get_series))
        .route("/api/v1/convert", post(http::http_post_convert))
        .route("/api/v1/check/pinyin", post(http::http_post_check_pinyin))
        .route("/api/v1/check/french", post(http::http_post_check_french))
        .route("/api/v1/choices", post(http::http_post_choices))
        .route("/api/v1/homophones/:id", get(http::http_get_homophones))
        // Quiz sessions
        .route("/api/v1/sessions", post(http::http_post_session))
        .route("/api/v1/sessions/:id", delete(http::http_delete_session))
        .route("/api/v1/sessions/:id/answer", post(http::http_post_answer))
        .route("/api/v1/sessions/:id/next", post(http::http_post_next))
        .route("/api/v1/sessions/:id/restart", post(http::http_post_restart))
        .route("/api/v1/sessions/:id/replay_errors", post(http::http_post_replay_errors))
        // Audio
        .route("/api/v1/audio/:id", get(http::http_get_audio))
        .route("/api/v1/audio/:id/downloaded", post(http::http_post_audio_downloaded))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
