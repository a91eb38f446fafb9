//! HTTP endpoint handlers. These are thin wrappers that forward to the
//! per-variant flows in `logic`.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::logic::*;
use crate::protocol::*;
use crate::session::Progress;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(state))]
pub async fn http_practice_view(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ViewQuery>,
) -> impl IntoResponse {
    Json(practice_view(&state, q.session).await)
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, answer_len = body.answer.len()))]
pub async fn http_practice_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnswerIn>,
) -> Result<Json<PracticeOut>, ApiError> {
    Ok(Json(practice_answer(&state, body.session_id, body.answer).await?))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_practice_next(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NextIn>,
) -> Result<Json<PracticeOut>, ApiError> {
    Ok(Json(practice_next(&state, body.session_id).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_leveled_view(
    State(state): State<Arc<AppState>>,
    Query(q): Query<LeveledViewQuery>,
) -> impl IntoResponse {
    let progress = Progress::from_params(q.solved.as_deref(), q.missed.as_deref());
    Json(leveled_view(&state, q.session, progress).await)
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, answer_len = body.answer.len()))]
pub async fn http_leveled_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LeveledAnswerIn>,
) -> Result<Json<LeveledOut>, ApiError> {
    let progress = Progress::from_params(body.solved.as_deref(), body.missed.as_deref());
    Ok(Json(
        leveled_answer(&state, body.session_id, body.answer, progress).await?,
    ))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_leveled_next(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LeveledNextIn>,
) -> Result<Json<LeveledOut>, ApiError> {
    let progress = Progress::from_params(body.solved.as_deref(), body.missed.as_deref());
    Ok(Json(leveled_next(&state, body.session_id, progress).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_reverse_view(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ViewQuery>,
) -> impl IntoResponse {
    Json(reverse_view(&state, q.session).await)
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id, answer_len = body.answer.len()))]
pub async fn http_reverse_answer(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnswerIn>,
) -> Result<Json<ReverseOut>, ApiError> {
    Ok(Json(reverse_answer(&state, body.session_id, body.answer).await?))
}

#[instrument(level = "info", skip(state, body), fields(%body.session_id))]
pub async fn http_reverse_next(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NextIn>,
) -> Result<Json<ReverseOut>, ApiError> {
    Ok(Json(reverse_next(&state, body.session_id).await?))
}
