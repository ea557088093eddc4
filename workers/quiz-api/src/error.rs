//! failures a route can answer with. each maps to a status code and is sent
//! to the client as `{"detail": "..."}`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// the caller sent something we cannot work with
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// wikipedia or the llm misbehaved
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Worker(#[from] worker::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    pub fn status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Upstream(_) => 502,
            ServiceError::Internal(_) | ServiceError::Worker(_) | ServiceError::Json(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ServiceError::BadRequest("x".into()).status(), 400);
        assert_eq!(ServiceError::NotFound("Quiz not found".into()).status(), 404);
        assert_eq!(ServiceError::Upstream("x".into()).status(), 502);
        assert_eq!(ServiceError::Internal("x".into()).status(), 500);
    }

    #[test]
    fn test_detail_is_the_message() {
        let e = ServiceError::BadRequest("Invalid Wikipedia URL".into());
        assert_eq!(e.to_string(), "Invalid Wikipedia URL");
    }
}
