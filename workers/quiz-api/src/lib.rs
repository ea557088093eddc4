//! ==============================================================================
//! lib.rs - quiz service cloudflare worker
//! ==============================================================================
//!
//! purpose:
//!     backend for the quiz dashboard. turns a wikipedia article into a
//!     multiple-choice quiz with an llm, stores every quiz in workers kv
//!     and serves the history back.
//!
//! relationships:
//!     - uses: shared (Quiz, HistoryEntry, request/response bodies, routes)
//!     - uses: workers kv namespace "QUIZZES" for persistent storage
//!     - uses: gemini generateContent api (secret GOOGLE_API_KEY,
//!       optional var GEMINI_MODEL)
//!     - called by: dashboard
//!
//! api:
//!     POST /generate_quiz
//!         body: {"url": "https://en.wikipedia.org/wiki/..."}
//!         response: {"quiz_id": 1, "quiz_data": {...quiz...}}
//!
//!     GET /history
//!         response: [{"id": 1, "title": "...", "url": "...", "date_generated": "..."}]
//!
//!     GET /quiz/:id
//!         response: {"id": 1, "title": "...", "quiz_data": {...quiz...}}
//!
//!     POST /preview_url
//!         body: {"url": "..."}
//!         response: {"valid": true, "title": "...", "url": "..."}
//!
//!     errors are {"detail": "..."} with a 4xx/5xx status.
//!
//! ==============================================================================

use serde::Serialize;
use shared::routes;
use shared::{ErrorDetail, GenerateQuizResponse, StoredQuizResponse, UrlPreview, UrlRequest};
use worker::*;

mod error;
mod generator;
mod scrape;
mod store;

use error::ServiceError;
use store::QuizStore;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

type ServiceResult<T> = std::result::Result<T, ServiceError>;

// ==============================================================================
// worker entry point
// ==============================================================================

#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let router = Router::new();

    router
        .get("/", handle_root)
        // health check
        .get("/health", |_, _| Response::ok("ok"))
        .post_async(routes::GENERATE_QUIZ, handle_generate)
        .get_async(routes::HISTORY, handle_history)
        .get_async(routes::QUIZ_BY_ID, handle_quiz)
        .post_async(routes::PREVIEW_URL, handle_preview)
        // cors preflight
        .options(routes::GENERATE_QUIZ, handle_cors)
        .options(routes::HISTORY, handle_cors)
        .options(routes::QUIZ_BY_ID, handle_cors)
        .options(routes::PREVIEW_URL, handle_cors)
        .run(req, env)
        .await
}

// ==============================================================================
// request handlers
// ==============================================================================

fn handle_root(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    json_response(&serde_json::json!({ "message": "Quiz API is running" }), 200)
}

/// generate (or reuse) a quiz for an article
async fn handle_generate(mut req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let body: UrlRequest = match req.json().await {
        Ok(b) => b,
        Err(_) => return json_error("invalid json body", 400),
    };

    respond(generate(&body.url, &ctx).await)
}

/// list stored quizzes, newest first
async fn handle_history(_req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let history = match QuizStore::open(&ctx.env) {
        Ok(store) => store.history().await.map_err(ServiceError::from),
        Err(e) => Err(e.into()),
    };

    respond(history)
}

/// fetch one stored quiz
async fn handle_quiz(_req: Request, ctx: RouteContext<()>) -> Result<Response> {
    let id = match ctx.param("id").and_then(|raw| parse_quiz_id(raw)) {
        Some(id) => id,
        None => return json_error("quiz id must be a positive integer", 400),
    };

    respond(load_quiz(id, &ctx).await)
}

/// check a url and return the article title
async fn handle_preview(mut req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    let body: UrlRequest = match req.json().await {
        Ok(b) => b,
        Err(_) => return json_error("invalid json body", 400),
    };

    respond(preview(body.url.trim()).await)
}

/// handle cors preflight
fn handle_cors(_req: Request, _ctx: RouteContext<()>) -> Result<Response> {
    let headers = Headers::new();
    headers.set("Access-Control-Allow-Origin", "*")?;
    headers.set("Access-Control-Allow-Methods", "POST, GET, OPTIONS")?;
    headers.set("Access-Control-Allow-Headers", "Content-Type")?;

    Ok(Response::empty()?.with_headers(headers))
}

// ==============================================================================
// route logic
// ==============================================================================

async fn generate(url: &str, ctx: &RouteContext<()>) -> ServiceResult<GenerateQuizResponse> {
    require_article_url(url)?;

    let store = QuizStore::open(&ctx.env)?;
    if let Some(existing) = store.find_by_url(url).await? {
        console_log!("cache hit for {}, returning quiz {}", url, existing.id);
        return Ok(GenerateQuizResponse {
            quiz_id: existing.id,
            quiz_data: existing.quiz_data,
        });
    }

    let html = fetch_article(url).await?;
    let title = scrape::extract_title(&html)
        .ok_or_else(|| ServiceError::Upstream("article has no title heading".to_string()))?;
    let text = scrape::extract_article_text(&html);

    let api_key = ctx
        .env
        .secret("GOOGLE_API_KEY")
        .map_err(|_| ServiceError::Internal("GOOGLE_API_KEY is not configured".to_string()))?
        .to_string();
    let model = ctx
        .env
        .var("GEMINI_MODEL")
        .map(|v| v.to_string())
        .unwrap_or_else(|_| generator::DEFAULT_MODEL.to_string());

    let mut quiz = generator::generate_quiz(&api_key, &model, &title, &text).await?;
    if quiz.title.trim().is_empty() {
        quiz.title = title;
    }

    let record = store.insert(url, text, quiz).await?;
    console_log!("stored quiz {} for {}", record.id, url);

    Ok(GenerateQuizResponse {
        quiz_id: record.id,
        quiz_data: record.quiz_data,
    })
}

async fn load_quiz(id: u64, ctx: &RouteContext<()>) -> ServiceResult<StoredQuizResponse> {
    let store = QuizStore::open(&ctx.env)?;
    let record = store
        .get(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Quiz not found".to_string()))?;

    Ok(StoredQuizResponse {
        id: record.id,
        title: record.title,
        quiz_data: record.quiz_data,
    })
}

async fn preview(url: &str) -> ServiceResult<UrlPreview> {
    require_article_url(url)?;

    let title = async {
        let html = fetch_article(url).await?;
        scrape::extract_title(&html)
            .ok_or_else(|| ServiceError::Upstream("no title heading found".to_string()))
    }
    .await
    .map_err(|e| ServiceError::Internal(format!("Error previewing article: {}", e)))?;

    Ok(UrlPreview {
        valid: true,
        title,
        url: url.to_string(),
    })
}

/// ids start at 1
fn parse_quiz_id(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id > 0)
}

fn require_article_url(url: &str) -> ServiceResult<()> {
    if url.is_empty() {
        return Err(ServiceError::BadRequest("Missing 'url' field".to_string()));
    }
    if !scrape::is_wikipedia_article(url) {
        return Err(ServiceError::BadRequest("Invalid Wikipedia URL".to_string()));
    }
    Ok(())
}

/// download an article's html
async fn fetch_article(url: &str) -> ServiceResult<String> {
    let headers = Headers::new();
    headers.set("User-Agent", USER_AGENT)?;

    let mut init = RequestInit::new();
    init.with_method(Method::Get).with_headers(headers);

    let mut response = Fetch::Request(Request::new_with_init(url, &init)?)
        .send()
        .await?;

    let status = response.status_code();
    if !(200..300).contains(&status) {
        return Err(ServiceError::Upstream(format!("article request returned status {}", status)));
    }

    Ok(response.text().await?)
}

// ==============================================================================
// responses
// ==============================================================================

fn respond<T: Serialize>(result: ServiceResult<T>) -> Result<Response> {
    match result {
        Ok(body) => json_response(&body, 200),
        Err(e) => {
            console_error!("request failed ({}): {}", e.status(), e);
            json_error(&e.to_string(), e.status())
        }
    }
}

fn json_error(detail: &str, status: u16) -> Result<Response> {
    let body = ErrorDetail {
        detail: detail.to_string(),
    };
    json_response(&body, status)
}

/// json body with cors
fn json_response<T: Serialize>(body: &T, status: u16) -> Result<Response> {
    let json = serde_json::to_string(body)?;
    let headers = Headers::new();
    headers.set("Content-Type", "application/json")?;
    headers.set("Access-Control-Allow-Origin", "*")?;

    Ok(Response::ok(json)?.with_status(status).with_headers(headers))
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url() {
        let err = require_article_url("").unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "Missing 'url' field");
    }

    #[test]
    fn test_non_wikipedia_url() {
        let err = require_article_url("https://example.com/article").unwrap_err();
        assert_eq!(err.status(), 400);
        assert_eq!(err.to_string(), "Invalid Wikipedia URL");
    }

    #[test]
    fn test_article_url_accepted() {
        assert!(require_article_url("https://en.wikipedia.org/wiki/Alan_Turing").is_ok());
    }

    #[test]
    fn test_quiz_id_must_be_positive() {
        assert_eq!(parse_quiz_id("12"), Some(12));
        assert_eq!(parse_quiz_id("0"), None);
        assert_eq!(parse_quiz_id("-3"), None);
        assert_eq!(parse_quiz_id("abc"), None);
    }

    #[test]
    fn test_error_detail_body() {
        let json = serde_json::to_string(&ErrorDetail { detail: "Quiz not found".to_string() }).unwrap();
        assert_eq!(json, r#"{"detail":"Quiz not found"}"#);
    }
}
