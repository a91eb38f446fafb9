//! Per-variant quiz flows shared by the HTTP handlers.
//!
//! Three variants, one flow each:
//!   - practice: Czech -> English, uniform draw over the whole dictionary
//!   - leveled:  Czech -> English, draw over (all keys - solved), progress
//!     sets carried by the caller
//!   - reverse:  English -> Czech over the inverted index
//!
//! Each `*_view` creates a session when the caller has none (or a stale id);
//! `*_answer` and `*_next` require a live session. All three return the full
//! refreshed view for their variant.

use tracing::{info, instrument};

use crate::domain::{audio_src, display_answer_form, Dictionary};
use crate::error::ApiError;
use crate::normalize::{normalize_czech, normalize_english, strip_parenthetical};
use crate::protocol::{LeveledOut, PracticeOut, ReverseOut};
use crate::session::{Progress, QuizSession};
use crate::state::AppState;

// -------- practice --------

#[instrument(level = "info", skip(state))]
pub async fn practice_view(state: &AppState, session: Option<String>) -> PracticeOut {
  let mut sessions = state.practice_sessions.write().await;
  if let Some(id) = session {
    if let Some(sess) = sessions.get(&id) {
      return practice_out(&id, sess, &state.dict);
    }
  }

  let id = AppState::new_session_id();
  let mut sess = QuizSession::default();
  let keys: Vec<&String> = state.dict.keys().collect();
  sess.advance_uniform(&keys, &mut rand::thread_rng());
  info!(target: "quiz", session = %id, prompt = ?sess.current, "practice session started");

  let out = practice_out(&id, &sess, &state.dict);
  sessions.insert(id, sess);
  out
}

#[instrument(level = "info", skip(state, answer), fields(answer_len = answer.len()))]
pub async fn practice_answer(
  state: &AppState,
  session_id: String,
  answer: String,
) -> Result<PracticeOut, ApiError> {
  let mut sessions = state.practice_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  if let Some(key) = sess.current.clone() {
    let accepted = state.dict.get(&key).cloned().unwrap_or_default();
    if sess.submit(&accepted, &answer, normalize_english) {
      info!(target: "quiz", session = %session_id, prompt = %key, correct = ?sess.is_correct, "practice answer evaluated");
    }
  }
  Ok(practice_out(&session_id, sess, &state.dict))
}

#[instrument(level = "info", skip(state))]
pub async fn practice_next(state: &AppState, session_id: String) -> Result<PracticeOut, ApiError> {
  let mut sessions = state.practice_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  let keys: Vec<&String> = state.dict.keys().collect();
  sess.advance_uniform(&keys, &mut rand::thread_rng());
  Ok(practice_out(&session_id, sess, &state.dict))
}

fn practice_out(id: &str, sess: &QuizSession, dict: &Dictionary) -> PracticeOut {
  let prompt = sess.current.clone().unwrap_or_default();
  let accepted = if sess.answered {
    dict.get(&prompt).cloned().unwrap_or_default()
  } else {
    Vec::new()
  };
  PracticeOut {
    session_id: id.to_string(),
    prompt,
    answered: sess.answered,
    correct: sess.is_correct,
    user_answer: sess.user_answer.clone(),
    accepted,
  }
}

// -------- leveled --------

#[instrument(level = "info", skip(state, progress))]
pub async fn leveled_view(
  state: &AppState,
  session: Option<String>,
  progress: Progress,
) -> LeveledOut {
  let mut sessions = state.leveled_sessions.write().await;
  if let Some(id) = session {
    if let Some(sess) = sessions.get(&id) {
      return leveled_out(&id, sess, state, &progress);
    }
  }

  let id = AppState::new_session_id();
  let mut sess = QuizSession::default();
  sess.advance_remaining(&state.dict, &progress.solved, &mut rand::thread_rng());
  info!(target: "quiz", session = %id, prompt = ?sess.current, solved = progress.solved.len(), "leveled session started");

  let out = leveled_out(&id, &sess, state, &progress);
  sessions.insert(id, sess);
  out
}

#[instrument(level = "info", skip(state, answer, progress), fields(answer_len = answer.len()))]
pub async fn leveled_answer(
  state: &AppState,
  session_id: String,
  answer: String,
  mut progress: Progress,
) -> Result<LeveledOut, ApiError> {
  let mut sessions = state.leveled_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  if let Some(key) = sess.current.clone() {
    let accepted = state.dict.get(&key).cloned().unwrap_or_default();
    if sess.submit(&accepted, &answer, normalize_english) {
      let correct = sess.is_correct == Some(true);
      progress.record(&key, correct);
      info!(target: "quiz", session = %session_id, prompt = %key, correct, solved = progress.solved.len(), "leveled answer evaluated");
    }
  }
  Ok(leveled_out(&session_id, sess, state, &progress))
}

#[instrument(level = "info", skip(state, progress))]
pub async fn leveled_next(
  state: &AppState,
  session_id: String,
  progress: Progress,
) -> Result<LeveledOut, ApiError> {
  let mut sessions = state.leveled_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  sess.advance_remaining(&state.dict, &progress.solved, &mut rand::thread_rng());
  if sess.current.is_none() {
    info!(target: "quiz", session = %session_id, "leveled pool exhausted");
  }
  Ok(leveled_out(&session_id, sess, state, &progress))
}

fn leveled_out(id: &str, sess: &QuizSession, state: &AppState, progress: &Progress) -> LeveledOut {
  let accepted = match &sess.current {
    Some(key) if sess.answered => state.dict.get(key).cloned().unwrap_or_default(),
    _ => Vec::new(),
  };
  let audio = sess
    .current
    .as_deref()
    .and_then(|key| audio_src(&state.audio, key));
  LeveledOut {
    session_id: id.to_string(),
    prompt: sess.current.clone(),
    answered: sess.answered,
    correct: sess.is_correct,
    user_answer: sess.user_answer.clone(),
    accepted,
    audio,
    solved: progress.solved.iter().cloned().collect(),
    missed: progress.missed.iter().cloned().collect(),
    solved_count: progress.solved.len(),
    total_count: state.dict.len(),
  }
}

// -------- reverse --------

#[instrument(level = "info", skip(state))]
pub async fn reverse_view(state: &AppState, session: Option<String>) -> ReverseOut {
  let mut sessions = state.reverse_sessions.write().await;
  if let Some(id) = session {
    if let Some(sess) = sessions.get(&id) {
      return reverse_out(&id, sess, state);
    }
  }

  let id = AppState::new_session_id();
  let mut sess = QuizSession::default();
  let keys: Vec<&String> = state.inverted.keys().collect();
  sess.advance_uniform(&keys, &mut rand::thread_rng());
  info!(target: "quiz", session = %id, prompt = ?sess.current, "reverse session started");

  let out = reverse_out(&id, &sess, state);
  sessions.insert(id, sess);
  out
}

#[instrument(level = "info", skip(state, answer), fields(answer_len = answer.len()))]
pub async fn reverse_answer(
  state: &AppState,
  session_id: String,
  answer: String,
) -> Result<ReverseOut, ApiError> {
  let mut sessions = state.reverse_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  if let Some(key) = sess.current.clone() {
    let candidates = state.inverted.get(&key).cloned().unwrap_or_default();
    if sess.submit(&candidates, &answer, normalize_czech) {
      info!(target: "quiz", session = %session_id, prompt = %key, correct = ?sess.is_correct, matched = ?sess.matched, "reverse answer evaluated");
    }
  }
  Ok(reverse_out(&session_id, sess, state))
}

#[instrument(level = "info", skip(state))]
pub async fn reverse_next(state: &AppState, session_id: String) -> Result<ReverseOut, ApiError> {
  let mut sessions = state.reverse_sessions.write().await;
  let sess = sessions
    .get_mut(&session_id)
    .ok_or_else(|| ApiError::UnknownSession(session_id.clone()))?;

  let keys: Vec<&String> = state.inverted.keys().collect();
  sess.advance_uniform(&keys, &mut rand::thread_rng());
  Ok(reverse_out(&session_id, sess, state))
}

fn reverse_out(id: &str, sess: &QuizSession, state: &AppState) -> ReverseOut {
  let key = sess.current.clone().unwrap_or_default();
  let accepted = if sess.answered {
    state.inverted.get(&key).cloned().unwrap_or_default()
  } else {
    Vec::new()
  };
  let audio = if sess.is_correct == Some(true) {
    sess
      .matched
      .as_deref()
      .and_then(|m| audio_src(&state.audio, &strip_parenthetical(m)))
  } else {
    None
  };
  ReverseOut {
    session_id: id.to_string(),
    prompt: display_answer_form(&state.dict, &key),
    answered: sess.answered,
    correct: sess.is_correct,
    user_answer: sess.user_answer.clone(),
    accepted,
    matched: sess.matched.clone(),
    audio,
  }
}
