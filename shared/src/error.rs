//! error taxonomy for calls to the quiz service

use thiserror::Error;

/// every failure the api client can report. none of them are fatal: callers
/// turn them into a short message and leave the ui interactive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// the request never produced a response
    #[error("network error: {0}")]
    Transport(String),

    /// non-2xx status without a usable error body
    #[error("request failed with status {0}")]
    Status(u16),

    /// non-2xx status carrying a `detail` message from the service
    #[error("{0}")]
    Rejected(String),

    /// the body was not the json we expected
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// the body decoded but has no `questions` array
    #[error("invalid quiz data format")]
    MalformedQuiz,
}

impl ApiError {
    pub fn is_malformed_quiz(&self) -> bool {
        matches!(self, ApiError::MalformedQuiz)
    }
}
