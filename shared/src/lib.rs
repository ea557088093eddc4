//! ==============================================================================
//! lib.rs - shared types and ui state for the article quiz
//! ==============================================================================
//!
//! purpose:
//!     defines the quiz data model, the http contract, and every piece of
//!     ui logic that does not need a dom: answer normalization, scoring,
//!     display modes and the generate/history flows.
//!
//! relationships:
//!     - used by: dashboard (api client decoding, component state)
//!     - used by: workers/quiz-api (request/response bodies, stored quizzes)
//!
//! design rationale:
//!     the dashboard only compiles to wasm, so its state machines live here
//!     where they can be unit tested natively. components keep a signal of
//!     these structs and render from them.
//!
//! ==============================================================================

pub mod answer;
pub mod attempt;
pub mod error;
pub mod flow;
pub mod model;
pub mod routes;

pub use answer::{answers_match, normalize_option};
pub use attempt::{DisplayMode, OptionMark, QuizAttempt};
pub use error::ApiError;
pub use flow::{
    GenerateForm, HistoryList, HistoryPanel, PreviewState, PreviewTicket, ViewMode,
    PREVIEW_DEBOUNCE_MS,
};
pub use model::{
    extract_quiz, Difficulty, ErrorDetail, GenerateQuizResponse, HistoryEntry, Question, Quiz,
    StoredQuizResponse, UrlPreview, UrlRequest,
};
