//! quiz generation through the gemini `generateContent` api
//!
//! the model is asked for a bare json quiz. replies are parsed leniently
//! (whole text first, then the outermost `{...}`) and then normalized so
//! every question carries a difficulty and an explanation.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use shared::{extract_quiz, Difficulty, Quiz};
use worker::*;

use crate::error::ServiceError;
use crate::scrape::truncate_chars;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const TEMPERATURE: f32 = 0.7;

/// article text beyond this is not sent to the model
pub const MAX_PROMPT_ARTICLE_CHARS: usize = 15_000;

const DEFAULT_EXPLANATION: &str = "Based on the article content.";

const INSTRUCTIONS: &str = r#"Turn the article below into a multiple-choice quiz.

Reply with one JSON object and nothing else (no markdown fences, no prose):

{
  "title": "<short quiz title>",
  "summary": "<two or three sentence summary of the article>",
  "questions": [
    {
      "question": "<question text>",
      "options": ["<option A>", "<option B>", "<option C>", "<option D>"],
      "answer": "<exact text of the correct option>",
      "difficulty": "<easy|medium|hard>",
      "explanation": "<one or two sentences grounded in the article>"
    }
  ],
  "related_topics": ["<topic>", "<topic>", "<topic>"]
}

Rules:
- Write 8 to 10 questions.
- easy = factual recall, medium = conceptual understanding, hard = reasoning or inference.
- "answer" must match one of the options exactly.
- Explanations must only use facts stated in the article.
- related_topics are Wikipedia article titles."#;

lazy_static! {
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

// ==============================================================================
// gemini wire types
// ==============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateContentResponse {
    /// concatenated text of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

// ==============================================================================
// prompt and reply handling
// ==============================================================================

pub fn build_prompt(title: &str, article: &str) -> String {
    format!(
        "{}\n\nArticle Title: {}\n\nArticle Content:\n{}\n",
        INSTRUCTIONS,
        title,
        truncate_chars(article, MAX_PROMPT_ARTICLE_CHARS)
    )
}

/// parse a model reply into a normalized quiz
pub fn parse_reply(reply: &str) -> std::result::Result<Quiz, ServiceError> {
    let value = match serde_json::from_str::<serde_json::Value>(reply.trim()) {
        Ok(value) => value,
        Err(_) => {
            let object = JSON_OBJECT
                .find(reply)
                .ok_or_else(|| ServiceError::Upstream("model reply contains no json".to_string()))?;
            serde_json::from_str(object.as_str())
                .map_err(|e| ServiceError::Upstream(format!("model reply is not valid json: {}", e)))?
        }
    };

    let mut quiz = extract_quiz(value)
        .map_err(|_| ServiceError::Upstream("model reply has no usable 'questions'".to_string()))?;
    normalize(&mut quiz);
    Ok(quiz)
}

/// fill gaps the model tends to leave
pub fn normalize(quiz: &mut Quiz) {
    for question in &mut quiz.questions {
        question.difficulty.get_or_insert(Difficulty::Medium);

        let missing = question
            .explanation
            .as_deref()
            .map_or(true, |text| text.trim().is_empty());
        if missing {
            question.explanation = Some(DEFAULT_EXPLANATION.to_string());
        }
    }
}

// ==============================================================================
// api call
// ==============================================================================

/// ask the model for a quiz about the article
pub async fn generate_quiz(
    api_key: &str,
    model: &str,
    title: &str,
    article: &str,
) -> std::result::Result<Quiz, ServiceError> {
    let body = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part { text: build_prompt(title, article) }],
        }],
        generation_config: GenerationConfig { temperature: TEMPERATURE },
    };

    let headers = Headers::new();
    headers.set("Content-Type", "application/json")?;
    headers.set("x-goog-api-key", api_key)?;

    let mut init = RequestInit::new();
    init.with_method(Method::Post)
        .with_headers(headers)
        .with_body(Some(wasm_bindgen::JsValue::from_str(&serde_json::to_string(&body)?)));

    let url = format!("{}/{}:generateContent", GEMINI_BASE, model);
    console_log!("sending prompt for '{}' to {}", title, model);

    let mut response = Fetch::Request(Request::new_with_init(&url, &init)?)
        .send()
        .await?;

    let status = response.status_code();
    if !(200..300).contains(&status) {
        let detail = response.text().await.unwrap_or_default();
        console_error!("gemini returned {}: {}", status, detail);
        return Err(ServiceError::Upstream(format!("quiz generation failed with status {}", status)));
    }

    let reply: GenerateContentResponse = response.json().await?;
    let text = reply
        .text()
        .ok_or_else(|| ServiceError::Upstream("model returned an empty reply".to_string()))?;

    parse_reply(&text)
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = r#"{
        "title": "Alan Turing",
        "summary": "English mathematician.",
        "questions": [
            {
                "question": "When was Turing born?",
                "options": ["A) 1912", "B) 1920", "C) 1899", "D) 1935"],
                "answer": "A) 1912",
                "difficulty": "EASY",
                "explanation": "Born 23 June 1912."
            },
            {
                "question": "What did he help break?",
                "options": ["Enigma", "Lorenz", "Purple", "Typex"],
                "answer": "Enigma",
                "difficulty": "legendary",
                "explanation": "  "
            }
        ],
        "related_topics": ["Enigma machine", "Bletchley Park"]
    }"#;

    #[test]
    fn test_parse_plain_reply() {
        let quiz = parse_reply(REPLY).unwrap();
        assert_eq!(quiz.title, "Alan Turing");
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.related_topics, vec!["Enigma machine", "Bletchley Park"]);
    }

    #[test]
    fn test_parse_fenced_reply() {
        let fenced = format!("Here is your quiz:\n```json\n{}\n```", REPLY);
        assert_eq!(parse_reply(&fenced).unwrap().questions.len(), 2);
    }

    #[test]
    fn test_normalizes_difficulty_and_explanation() {
        let quiz = parse_reply(REPLY).unwrap();
        assert_eq!(quiz.questions[0].difficulty, Some(Difficulty::Easy));
        assert_eq!(quiz.questions[1].difficulty, Some(Difficulty::Medium));
        assert_eq!(quiz.questions[0].explanation.as_deref(), Some("Born 23 June 1912."));
        assert_eq!(quiz.questions[1].explanation.as_deref(), Some(DEFAULT_EXPLANATION));
    }

    #[test]
    fn test_reply_without_questions_fails() {
        let err = parse_reply(r#"{"title": "x"}"#).unwrap_err();
        assert_eq!(err.status(), 502);
        assert!(parse_reply("I cannot help with that.").is_err());
    }

    #[test]
    fn test_non_list_related_topics_default_to_empty() {
        let reply = REPLY.replace(
            r#""related_topics": ["Enigma machine", "Bletchley Park"]"#,
            r#""related_topics": "Enigma machine""#,
        );
        let quiz = parse_reply(&reply).unwrap();
        assert!(quiz.related_topics.is_empty());
        assert_eq!(quiz.questions.len(), 2);

        let reply = REPLY.replace(r#""summary": "English mathematician.""#, r#""summary": null"#);
        assert_eq!(parse_reply(&reply).unwrap().summary, "");
    }

    #[test]
    fn test_non_string_explanation_gets_default() {
        let reply = REPLY.replace(r#""explanation": "Born 23 June 1912.""#, r#""explanation": 1912"#);
        let quiz = parse_reply(&reply).unwrap();
        assert_eq!(quiz.questions[0].explanation.as_deref(), Some(DEFAULT_EXPLANATION));
    }

    #[test]
    fn test_prompt_caps_article() {
        let article = "a".repeat(MAX_PROMPT_ARTICLE_CHARS + 500);
        let prompt = build_prompt("Title", &article);
        assert!(prompt.contains("Article Title: Title"));
        assert!(!prompt.contains(&"a".repeat(MAX_PROMPT_ARTICLE_CHARS + 1)));
    }

    #[test]
    fn test_response_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"a\":"},{"text":"1}"}],"role":"model"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));

        let empty: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.text(), None);
    }
}
