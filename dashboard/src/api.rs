//! ==============================================================================
//! api.rs - API client for the quiz service
//! ==============================================================================

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::routes;
use shared::{extract_quiz, ApiError, ErrorDetail, HistoryEntry, Quiz, UrlPreview, UrlRequest};

// local `wrangler dev` instance of workers/quiz-api
const DEFAULT_API_BASE: &str = "http://127.0.0.1:8787";

/// base url of the quiz service, overridable at build time with QUIZ_API_BASE
pub const API_BASE: &str = match option_env!("QUIZ_API_BASE") {
    Some(base) => base,
    None => DEFAULT_API_BASE,
};

fn endpoint(path: &str) -> String {
    format!("{}{}", API_BASE.trim_end_matches('/'), path)
}

fn transport(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

// ==============================================================================
// request helpers
// ==============================================================================

async fn get(path: &str) -> Result<Response, ApiError> {
    Request::get(&endpoint(path))
        .send()
        .await
        .map_err(transport)
}

async fn post_url(path: &str, url: &str) -> Result<Response, ApiError> {
    let body = UrlRequest { url: url.to_string() };

    Request::post(&endpoint(path))
        .json(&body)
        .map_err(transport)?
        .send()
        .await
        .map_err(transport)
}

/// decode a successful body, or fail on the status alone
async fn success_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

// ==============================================================================
// API functions
// ==============================================================================

/// Generate a quiz for an article
pub async fn generate_quiz(url: &str) -> Result<Quiz, ApiError> {
    let body: Value = success_json(post_url(routes::GENERATE_QUIZ, url).await?).await?;
    extract_quiz(body)
}

/// List previously generated quizzes, newest first
pub async fn get_history() -> Result<Vec<HistoryEntry>, ApiError> {
    let body: Value = success_json(get(routes::HISTORY).await?).await?;

    // anything but an array reads as an empty history
    if !body.is_array() {
        log::warn!("history response is not an array, treating as empty");
        return Ok(Vec::new());
    }

    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Load one stored quiz
pub async fn get_quiz_by_id(id: u64) -> Result<Quiz, ApiError> {
    let body: Value = success_json(get(&routes::quiz_path(id)).await?).await?;
    extract_quiz(body)
}

/// Check that a url is reachable and fetch its title
pub async fn preview_url(url: &str) -> Result<UrlPreview, ApiError> {
    let response = post_url(routes::PREVIEW_URL, url).await?;

    if !response.ok() {
        let detail = response
            .json::<ErrorDetail>()
            .await
            .ok()
            .map(|e| e.detail)
            .filter(|detail| !detail.is_empty())
            .unwrap_or_else(|| "Invalid URL".to_string());
        return Err(ApiError::Rejected(detail));
    }

    response
        .json::<UrlPreview>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_route() {
        let url = endpoint(routes::HISTORY);
        assert!(url.ends_with("/history"));
        assert!(!url.contains("//history"));
    }
}
