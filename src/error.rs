//! Error types: fatal configuration failures at startup and the single
//! request-level API error.

use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Startup failures. None of these are retryable; `main` exits on them.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("word list not found at {}", .0.display())]
    WordsMissing(PathBuf),

    #[error("failed to read word list {}: {}", .path.display(), .source)]
    WordsUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("word list {} is not a valid dictionary: {}", .path.display(), .source)]
    WordsInvalid {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("word list {} contains no entries", .0.display())]
    EmptyDictionary(PathBuf),

    #[error("word list {} yields an empty inverted index (no usable answers)", .0.display())]
    EmptyInvertedIndex(PathBuf),
}

/// Request-level errors. Everything the quiz itself produces (wrong answer,
/// empty submission, exhausted pool) is a normal outcome, not an error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unknown session: {0}")]
    UnknownSession(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::UnknownSession(_) => (StatusCode::NOT_FOUND, "unknown_session"),
        };
        let body = Json(ErrorBody {
            error: kind.to_string(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_session_maps_to_not_found() {
        let response = ApiError::UnknownSession("abc".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn config_errors_render_their_path() {
        let err = ConfigError::EmptyDictionary(PathBuf::from("./words.json"));
        assert_eq!(err.to_string(), "word list ./words.json contains no entries");
    }
}
