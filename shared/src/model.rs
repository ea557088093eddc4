//! quiz data model and the json bodies exchanged with the quiz service

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ApiError;

// ==============================================================================
// quiz types
// ==============================================================================

/// a generated quiz, read-only from the ui's point of view
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub summary: String,
    pub questions: Vec<Question>,
    /// wikipedia-style topic names suggested by the generator
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    /// text of the correct option, possibly with a different "A) " prefix or case
    pub answer: String,
    #[serde(
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_difficulty",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// parse loosely: surrounding whitespace and case are ignored
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// unknown or non-string difficulty values read as absent instead of failing
/// the whole quiz
fn lenient_difficulty<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(Value::as_str).and_then(Difficulty::parse))
}

// optional quiz fields never fail the whole quiz: null or a wrong type reads
// as the field's empty value

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_optional_string(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Ok(Some(text)),
        _ => Ok(None),
    }
}

/// non-array values read as empty; non-string items are dropped
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => Ok(items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// summary row of a stored quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub title: String,
    pub url: String,
    /// iso-8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_generated: Option<String>,
}

// ==============================================================================
// request / response bodies
// ==============================================================================

/// body of POST /generate_quiz and POST /preview_url
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: String,
}

/// metadata returned by POST /preview_url
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlPreview {
    #[serde(default)]
    pub valid: bool,
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// error body the service sends with any non-2xx status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// POST /generate_quiz success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub quiz_id: u64,
    pub quiz_data: Quiz,
}

/// GET /quiz/{id} success body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuizResponse {
    pub id: u64,
    pub title: String,
    pub quiz_data: Quiz,
}

// ==============================================================================
// response-shape normalization
// ==============================================================================

/// pull a quiz out of a response body.
///
/// the service is inconsistent about wrapping: the same logical payload
/// arrives as `{"quiz": {...}}`, `{"quiz_data": {...}}` or bare. the keys are
/// tried in that order and the body itself is the last resort. the chosen
/// payload must carry a `questions` array.
pub fn extract_quiz(body: Value) -> Result<Quiz, ApiError> {
    let payload = unwrap_quiz_payload(body);

    if !payload.get("questions").is_some_and(Value::is_array) {
        return Err(ApiError::MalformedQuiz);
    }

    serde_json::from_value(payload).map_err(|_| ApiError::MalformedQuiz)
}

fn unwrap_quiz_payload(mut body: Value) -> Value {
    for key in ["quiz", "quiz_data"] {
        if let Some(inner) = body.get_mut(key) {
            if is_present(inner) {
                return inner.take();
            }
        }
    }
    body
}

/// null, false, zero and empty strings count as missing wrappers
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ==============================================================================
// tests
// ==============================================================================
