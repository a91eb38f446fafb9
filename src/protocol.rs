//! Public request/response structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.
//!
//! Every response carries the full refreshed view of its variant, the
//! request/response equivalent of the original pages re-rendering after a
//! form post. Accepted answers appear only once the prompt is answered.

use serde::{Deserialize, Serialize};

//
// Shared inputs
//

/// View request; a missing or stale session id starts a fresh session.
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    pub session: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub answer: String,
}

#[derive(Debug, Deserialize)]
pub struct NextIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

//
// Practice (Czech -> English, uniform draw)
//

#[derive(Debug, Serialize)]
pub struct PracticeOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub prompt: String,
    pub answered: bool,
    pub correct: Option<bool>,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
    pub accepted: Vec<String>,
}

//
// Leveled (Czech -> English with solved/missed carry-over)
//

#[derive(Debug, Deserialize)]
pub struct LeveledViewQuery {
    pub session: Option<String>,
    /// JSON-encoded array of solved prompt keys, as previously emitted.
    pub solved: Option<String>,
    /// JSON-encoded array of missed prompt keys.
    pub missed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeveledAnswerIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub answer: String,
    pub solved: Option<String>,
    pub missed: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LeveledNextIn {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub solved: Option<String>,
    pub missed: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeveledOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    /// `None` once every word has been solved.
    pub prompt: Option<String>,
    pub answered: bool,
    pub correct: Option<bool>,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
    pub accepted: Vec<String>,
    pub audio: Option<String>,
    /// Updated sets; the client round-trips them on the next request.
    pub solved: Vec<String>,
    pub missed: Vec<String>,
    #[serde(rename = "solvedCount")]
    pub solved_count: usize,
    #[serde(rename = "totalCount")]
    pub total_count: usize,
}

//
// Reverse (English -> Czech over the inverted index)
//

#[derive(Debug, Serialize)]
pub struct ReverseOut {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub prompt: String,
    pub answered: bool,
    pub correct: Option<bool>,
    #[serde(rename = "userAnswer")]
    pub user_answer: String,
    /// Original-form Czech candidates, gender markers intact.
    pub accepted: Vec<String>,
    pub matched: Option<String>,
    /// Pronunciation of the matched Czech word; present only after a
    /// correct answer with a mapped audio file.
    pub audio: Option<String>,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
