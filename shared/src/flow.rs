//! state machines behind the generate and history tabs

use crate::error::ApiError;
use crate::model::{HistoryEntry, Quiz, UrlPreview};

/// quiet period after the last keystroke before the url is validated
pub const PREVIEW_DEBOUNCE_MS: u32 = 700;

pub const MSG_EMPTY_URL: &str = "Please enter a valid URL";
pub const MSG_INVALID_URL: &str = "Invalid or unreachable URL";
pub const MSG_BAD_FORMAT: &str = "Invalid quiz data format.";
pub const MSG_GENERATE_FAILED: &str = "Failed to generate quiz. Try again later.";
pub const MSG_HISTORY_FAILED: &str = "Failed to load quiz history.";
pub const MSG_QUIZ_LOAD_FAILED: &str = "Unable to load quiz. Please try again.";

// ==============================================================================
// view mode
// ==============================================================================

/// what the user chose to do with a loaded quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    None,
    /// reveal answers
    View,
    /// take the quiz
    Quiz,
}

impl ViewMode {
    pub fn quiz_mode(&self) -> bool {
        *self == ViewMode::Quiz
    }

    pub fn reveal_answers(&self) -> bool {
        *self == ViewMode::View
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            ViewMode::None => None,
            ViewMode::View => Some("Viewing Answers"),
            ViewMode::Quiz => Some("Taking Quiz"),
        }
    }
}

// ==============================================================================
// generate tab
// ==============================================================================

/// identifies one scheduled validation. a timer holding an older ticket than
/// the form's current one belongs to superseded input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PreviewState {
    #[default]
    Idle,
    /// debounce timer running
    Scheduled,
    /// preview request in flight
    Checking,
    Ready(UrlPreview),
    Invalid,
}

/// everything the generate tab shows, minus the timer handle itself
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateForm {
    url: String,
    error: Option<String>,
    preview: PreviewState,
    ticket: u64,
    generating: bool,
    quiz: Option<Quiz>,
    mode: ViewMode,
}

impl GenerateForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn preview_error(&self) -> Option<&'static str> {
        matches!(self.preview, PreviewState::Invalid).then_some(MSG_INVALID_URL)
    }

    pub fn is_checking(&self) -> bool {
        self.preview == PreviewState::Checking
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// a keystroke. clears the error and any preview right away and returns
    /// a ticket when the new value deserves validation; the previous ticket
    /// is invalidated either way.
    pub fn input(&mut self, value: String) -> Option<PreviewTicket> {
        self.ticket += 1;
        self.error = None;
        self.preview = PreviewState::Idle;

        let schedule = !value.trim().is_empty();
        self.url = value;

        if schedule {
            self.preview = PreviewState::Scheduled;
            Some(PreviewTicket(self.ticket))
        } else {
            None
        }
    }

    /// the debounce timer for `ticket` fired. returns the url to validate,
    /// or `None` when newer input has superseded it.
    pub fn begin_preview(&mut self, ticket: PreviewTicket) -> Option<String> {
        if ticket.0 != self.ticket {
            return None;
        }
        self.preview = PreviewState::Checking;
        Some(self.url.clone())
    }

    /// a validation response arrived. a response for superseded input is
    /// still applied; the debounce window makes that race rare.
    pub fn finish_preview(&mut self, result: Result<UrlPreview, ApiError>) {
        self.preview = match result {
            Ok(preview) => PreviewState::Ready(preview),
            Err(_) => PreviewState::Invalid,
        };
    }

    /// the generate button. returns the url to request, or `None` after
    /// flagging blank input.
    pub fn begin_generate(&mut self) -> Option<String> {
        if self.url.trim().is_empty() {
            self.error = Some(MSG_EMPTY_URL.to_string());
            return None;
        }
        self.generating = true;
        self.error = None;
        Some(self.url.clone())
    }

    /// failures leave the previously shown quiz in place
    pub fn finish_generate(&mut self, result: Result<Quiz, ApiError>) {
        self.generating = false;
        match result {
            Ok(quiz) => {
                self.quiz = Some(quiz);
                self.mode = ViewMode::None;
            }
            Err(e) if e.is_malformed_quiz() => self.error = Some(MSG_BAD_FORMAT.to_string()),
            Err(_) => self.error = Some(MSG_GENERATE_FAILED.to_string()),
        }
    }

    pub fn choose_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn reset_mode(&mut self) {
        self.mode = ViewMode::None;
    }
}

// ==============================================================================
// history tab
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HistoryList {
    #[default]
    Loading,
    Failed(String),
    Loaded(Vec<HistoryEntry>),
}

impl HistoryList {
    /// loaded but nothing stored yet, as opposed to a failed load
    pub fn is_empty(&self) -> bool {
        matches!(self, HistoryList::Loaded(rows) if rows.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryPanel {
    list: HistoryList,
    selected: Option<Quiz>,
    mode: ViewMode,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &HistoryList {
        &self.list
    }

    pub fn selected(&self) -> Option<&Quiz> {
        self.selected.as_ref()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn begin_load(&mut self) {
        self.list = HistoryList::Loading;
    }

    pub fn finish_load(&mut self, result: Result<Vec<HistoryEntry>, ApiError>) {
        self.list = match result {
            Ok(rows) => HistoryList::Loaded(rows),
            Err(_) => HistoryList::Failed(MSG_HISTORY_FAILED.to_string()),
        };
    }

    /// result of opening a row. on failure the current selection is kept and
    /// the message to alert is returned.
    pub fn finish_open(&mut self, result: Result<Quiz, ApiError>) -> Option<&'static str> {
        match result {
            Ok(quiz) => {
                self.selected = Some(quiz);
                self.mode = ViewMode::None;
                None
            }
            Err(_) => Some(MSG_QUIZ_LOAD_FAILED),
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
        self.mode = ViewMode::None;
    }

    pub fn choose_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn reset_mode(&mut self) {
        self.mode = ViewMode::None;
    }
}

// ==============================================================================
// tests
// ==============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::extract_quiz;
    use crate::routes::quiz_path;
    use serde_json::json;

    fn sample_quiz(title: &str) -> Quiz {
        extract_quiz(json!({
            "quiz_data": {
                "title": title,
                "summary": "s",
                "questions": [{ "question": "q", "options": ["A) x", "B) y"], "answer": "x" }]
            }
        }))
        .unwrap()
    }

    fn preview(title: &str) -> UrlPreview {
        UrlPreview { valid: true, title: title.to_string(), url: String::new() }
    }

    #[test]
    fn test_view_mode_flags() {
        assert!(!ViewMode::None.quiz_mode() && !ViewMode::None.reveal_answers());
        assert!(ViewMode::Quiz.quiz_mode() && !ViewMode::Quiz.reveal_answers());
        assert!(ViewMode::View.reveal_answers() && !ViewMode::View.quiz_mode());
        assert_eq!(ViewMode::None.label(), None);
    }

    #[test]
    fn test_blank_input_is_not_scheduled() {
        let mut form = GenerateForm::new();
        assert_eq!(form.input("   ".to_string()), None);
        assert_eq!(form.preview(), &PreviewState::Idle);
    }

    #[test]
    fn test_whitespace_generate_makes_no_request() {
        let mut form = GenerateForm::new();
        form.input("  ".to_string());
        assert_eq!(form.begin_generate(), None);
        assert_eq!(form.error(), Some(MSG_EMPTY_URL));
        assert!(!form.is_generating());
    }

    #[test]
    fn test_preview_after_debounce() {
        let mut form = GenerateForm::new();
        let ticket = form.input("https://en.wikipedia.org/wiki/Rust".to_string()).unwrap();
        assert_eq!(form.preview(), &PreviewState::Scheduled);

        let url = form.begin_preview(ticket).unwrap();
        assert_eq!(url, "https://en.wikipedia.org/wiki/Rust");
        assert!(form.is_checking());

        form.finish_preview(Ok(preview("Example")));
        match form.preview() {
            PreviewState::Ready(p) => assert_eq!(p.title, "Example"),
            other => panic!("unexpected state {other:?}"),
        }
        assert_eq!(form.url(), "https://en.wikipedia.org/wiki/Rust");
    }

    #[test]
    fn test_keystroke_supersedes_pending_validation() {
        let mut form = GenerateForm::new();
        let first = form.input("https://a".to_string()).unwrap();
        let second = form.input("https://ab".to_string()).unwrap();

        assert_eq!(form.begin_preview(first), None);
        assert_eq!(form.begin_preview(second), Some("https://ab".to_string()));
    }

    #[test]
    fn test_keystroke_clears_preview_and_error() {
        let mut form = GenerateForm::new();
        let ticket = form.input("x".to_string()).unwrap();
        form.begin_preview(ticket);
        form.finish_preview(Err(ApiError::Rejected("Invalid Wikipedia URL".to_string())));
        assert_eq!(form.preview_error(), Some(MSG_INVALID_URL));

        form.input(String::new());
        form.begin_generate();
        assert!(form.error().is_some());

        form.input("y".to_string());
        assert_eq!(form.preview_error(), None);
        assert_eq!(form.error(), None);
    }

    #[test]
    fn test_late_preview_still_applies() {
        let mut form = GenerateForm::new();
        let ticket = form.input("https://a".to_string()).unwrap();
        form.begin_preview(ticket);
        form.input("https://ab".to_string());
        form.finish_preview(Ok(preview("Stale")));
        assert!(matches!(form.preview(), PreviewState::Ready(p) if p.title == "Stale"));
    }

    #[test]
    fn test_generate_success_resets_mode() {
        let mut form = GenerateForm::new();
        form.input("https://a".to_string());
        form.begin_generate().unwrap();
        form.finish_generate(Ok(sample_quiz("First")));
        form.choose_mode(ViewMode::Quiz);

        assert!(form.begin_generate().is_some());
        assert!(form.is_generating());
        form.finish_generate(Ok(sample_quiz("Second")));
        assert!(!form.is_generating());
        assert_eq!(form.quiz().unwrap().title, "Second");
        assert_eq!(form.mode(), ViewMode::None);
    }

    #[test]
    fn test_generate_failures_keep_previous_quiz() {
        let mut form = GenerateForm::new();
        form.input("https://a".to_string());
        form.begin_generate();
        form.finish_generate(Ok(sample_quiz("Kept")));
        form.choose_mode(ViewMode::View);

        form.begin_generate();
        form.finish_generate(Err(ApiError::MalformedQuiz));
        assert_eq!(form.error(), Some(MSG_BAD_FORMAT));
        assert_eq!(form.quiz().unwrap().title, "Kept");
        assert_eq!(form.mode(), ViewMode::View);

        form.begin_generate();
        form.finish_generate(Err(ApiError::Status(500)));
        assert_eq!(form.error(), Some(MSG_GENERATE_FAILED));
        assert_eq!(form.quiz().unwrap().title, "Kept");
    }

    #[test]
    fn test_change_mode_keeps_quiz() {
        let mut form = GenerateForm::new();
        form.input("u".to_string());
        form.begin_generate();
        form.finish_generate(Ok(sample_quiz("Q")));
        form.choose_mode(ViewMode::Quiz);
        form.reset_mode();
        assert_eq!(form.mode(), ViewMode::None);
        assert!(form.quiz().is_some());
    }

    #[test]
    fn test_history_states() {
        let mut panel = HistoryPanel::new();
        assert_eq!(panel.list(), &HistoryList::Loading);

        panel.finish_load(Ok(vec![]));
        assert!(panel.list().is_empty());

        panel.begin_load();
        assert_eq!(panel.list(), &HistoryList::Loading);
        assert!(!panel.list().is_empty());
        panel.finish_load(Err(ApiError::Transport("offline".to_string())));
        assert_eq!(panel.list(), &HistoryList::Failed(MSG_HISTORY_FAILED.to_string()));
        assert!(!panel.list().is_empty());
    }

    #[test]
    fn test_history_row_opens_quiz() {
        let rows: Vec<HistoryEntry> =
            serde_json::from_value(json!([{ "id": 1, "title": "T", "url": "http://x" }])).unwrap();
        let mut panel = HistoryPanel::new();
        panel.finish_load(Ok(rows));

        let HistoryList::Loaded(rows) = panel.list() else {
            panic!("history should be loaded");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(quiz_path(rows[0].id), "/quiz/1");

        assert_eq!(panel.finish_open(Ok(sample_quiz("T"))), None);
        assert_eq!(panel.selected().unwrap().title, "T");
        assert_eq!(panel.mode(), ViewMode::None);
    }

    #[test]
    fn test_history_open_failure_keeps_selection() {
        let mut panel = HistoryPanel::new();
        panel.finish_open(Ok(sample_quiz("Old")));
        panel.choose_mode(ViewMode::Quiz);

        let alert = panel.finish_open(Err(ApiError::MalformedQuiz));
        assert_eq!(alert, Some(MSG_QUIZ_LOAD_FAILED));
        assert_eq!(panel.selected().unwrap().title, "Old");
        assert_eq!(panel.mode(), ViewMode::Quiz);
    }

    #[test]
    fn test_history_close() {
        let mut panel = HistoryPanel::new();
        panel.finish_open(Ok(sample_quiz("Old")));
        panel.close();
        assert!(panel.selected().is_none());
        assert_eq!(panel.mode(), ViewMode::None);
    }
}
