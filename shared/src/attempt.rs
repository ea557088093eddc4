//! quiz display state: which mode is showing, what the user picked, and how
//! each option should be marked

use std::collections::BTreeMap;

use crate::answer::answers_match;
use crate::model::{Question, Quiz};

// ==============================================================================
// display mode
// ==============================================================================

/// the three mutually exclusive presentations of a quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// placeholder only, no questions
    Inert,
    /// interactive: pick options, then submit for a score
    Taking,
    /// every correct option and explanation shown, no interaction
    Reveal,
}

impl DisplayMode {
    /// callers never set both flags; if they do, taking the quiz wins
    pub fn from_flags(quiz_mode: bool, reveal_answers: bool) -> Self {
        match (quiz_mode, reveal_answers) {
            (true, _) => DisplayMode::Taking,
            (false, true) => DisplayMode::Reveal,
            (false, false) => DisplayMode::Inert,
        }
    }

    pub fn shows_questions(&self) -> bool {
        !matches!(self, DisplayMode::Inert)
    }
}

// ==============================================================================
// option marking
// ==============================================================================

/// how a single option renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionMark {
    /// the user picked this option (pre-submit highlight)
    pub selected: bool,
    /// highlight as the correct option
    pub correct: bool,
    /// highlight as the user's wrong pick
    pub wrong: bool,
    /// ✅ or ❌ appended after submission
    pub badge: Option<&'static str>,
}

impl OptionMark {
    pub fn class(&self) -> String {
        let mut class = String::from("option");
        if self.correct {
            class.push_str(" correct");
        } else if self.wrong {
            class.push_str(" wrong");
        }
        if self.selected {
            class.push_str(" selected");
        }
        class
    }
}

// ==============================================================================
// attempt
// ==============================================================================

/// the user's in-progress answers for one quiz. transient: any change to
/// either display flag wipes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizAttempt {
    answers: BTreeMap<usize, String>,
    submitted: bool,
    /// (quiz_mode, reveal_answers) last seen by `sync_flags`
    flags: Option<(bool, bool)>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// forget every answer and reopen submission
    pub fn reset(&mut self) {
        self.answers.clear();
        self.submitted = false;
    }

    /// follow the parent's display flags. the first call only records them;
    /// any later change resets the attempt. returns the mode to render.
    pub fn sync_flags(&mut self, quiz_mode: bool, reveal_answers: bool) -> DisplayMode {
        let flags = (quiz_mode, reveal_answers);
        if self.flags.is_some_and(|seen| seen != flags) {
            self.reset();
        }
        self.flags = Some(flags);
        DisplayMode::from_flags(quiz_mode, reveal_answers)
    }

    /// record `option` for question `index`, replacing any earlier pick.
    /// ignored outside quiz-taking mode and after submission.
    pub fn select(&mut self, mode: DisplayMode, index: usize, option: &str) -> bool {
        if mode != DisplayMode::Taking || self.submitted {
            return false;
        }
        self.answers.insert(index, option.to_string());
        true
    }

    /// one-way: only a reset reopens the attempt
    pub fn submit(&mut self, mode: DisplayMode) -> bool {
        if mode != DisplayMode::Taking {
            return false;
        }
        self.submitted = true;
        true
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    /// whether question `index` was answered correctly. unanswered is wrong.
    pub fn is_correct(&self, index: usize, question: &Question) -> bool {
        self.answer(index)
            .is_some_and(|picked| answers_match(picked, &question.answer))
    }

    /// number of questions whose pick matches the correct answer
    pub fn score(&self, quiz: &Quiz) -> usize {
        quiz.questions
            .iter()
            .enumerate()
            .filter(|(index, question)| self.is_correct(*index, question))
            .count()
    }

    /// card-level verdict, only known once a taken quiz is submitted
    pub fn card_verdict(&self, mode: DisplayMode, index: usize, question: &Question) -> Option<bool> {
        (mode == DisplayMode::Taking && self.submitted).then(|| self.is_correct(index, question))
    }

    pub fn shows_explanation(&self, mode: DisplayMode) -> bool {
        match mode {
            DisplayMode::Taking => self.submitted,
            DisplayMode::Reveal => true,
            DisplayMode::Inert => false,
        }
    }

    /// marking for one option of question `index`
    pub fn option_mark(
        &self,
        mode: DisplayMode,
        index: usize,
        question: &Question,
        option: &str,
    ) -> OptionMark {
        let selected = self.answer(index) == Some(option);
        let correct = answers_match(option, &question.answer);

        match mode {
            DisplayMode::Inert => OptionMark::default(),
            DisplayMode::Reveal => OptionMark {
                correct,
                ..OptionMark::default()
            },
            DisplayMode::Taking if !self.submitted => OptionMark {
                selected,
                ..OptionMark::default()
            },
            DisplayMode::Taking => OptionMark {
                selected: false,
                correct,
                wrong: selected && !correct,
                badge: match (selected, correct) {
                    (true, true) => Some("✅"),
                    (true, false) => Some("❌"),
                    _ => None,
                },
            },
        }
    }
}

// ==============================================================================
// tests
// ==============================================================================
