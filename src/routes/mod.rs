//! Router assembly: HTTP endpoints, audio files, static frontend, CORS, and
//! HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
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

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`, one group per quiz variant
/// - Pronunciation files from the configured audio directory at `/audios`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers) – adjust for production if needed
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    let audio_service = ServeDir::new(&state.config.audios_dir);

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        // Czech -> English, uniform draw
        .route("/api/v1/practice", get(http::http_practice_view))
        .route("/api/v1/practice/answer", post(http::http_practice_answer))
        .route("/api/v1/practice/next", post(http::http_practice_next))
        // Czech -> English with solved/missed carry-over
        .route("/api/v1/leveled", get(http::http_leveled_view))
        .route("/api/v1/leveled/answer", post(http::http_leveled_answer))
        .route("/api/v1/leveled/next", post(http::http_leveled_next))
        // English -> Czech over the inverted index
        .route("/api/v1/reverse", get(http::http_reverse_view))
        .route("/api/v1/reverse/answer", post(http::http_reverse_answer))
        .route("/api/v1/reverse/next", post(http::http_reverse_next))
        .with_state(state)
        .nest_service("/audios", audio_service)
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
        .fallback_service(static_service)
}
