//! Quiz display component
//!
//! renders one quiz in the mode picked by the parent:
//!     - neither flag: placeholder, no questions
//!     - quiz_mode: pick options, submit once, see score and explanations
//!     - reveal_answers: correct options and explanations, no interaction
//!
//! the attempt (picks + submitted) is local and is thrown away whenever
//! either flag changes.

use leptos::prelude::*;
use shared::{DisplayMode, Question, Quiz, QuizAttempt};

#[component]
pub fn QuizDisplay(
    #[prop(into)] quiz: Signal<Quiz>,
    #[prop(into)] quiz_mode: Signal<bool>,
    #[prop(into)] reveal_answers: Signal<bool>,
) -> impl IntoView {
    let attempt = RwSignal::new(QuizAttempt::new());
    let mode = Memo::new(move |_| DisplayMode::from_flags(quiz_mode.get(), reveal_answers.get()));

    // mode switches are destructive
    Effect::new(move |_| {
        let (quiz_mode, reveal_answers) = (quiz_mode.get(), reveal_answers.get());
        attempt.update(|a| {
            a.sync_flags(quiz_mode, reveal_answers);
        });
    });

    let submit = move |_| {
        attempt.update(|a| {
            a.submit(mode.get_untracked());
        });
    };

    view! {
        <div class="quiz-display">
            <h2 class="quiz-title">{move || quiz.with(|q| q.title.clone())}</h2>
            <p class="quiz-summary">{move || quiz.with(|q| q.summary.clone())}</p>

            <hr />

            {move || {
                let mode = mode.get();
                if !mode.shows_questions() {
                    return view! {
                        <div class="quiz-placeholder">
                            <p>"Choose a mode above to start your quiz or view answers."</p>
                        </div>
                    }
                    .into_any();
                }

                let quiz = quiz.get();
                let state = attempt.get();
                let cards = quiz
                    .questions
                    .iter()
                    .enumerate()
                    .map(|(index, question)| question_card(index, question, mode, &state, attempt))
                    .collect::<Vec<_>>();

                view! {
                    {cards}
                    <RelatedTopics topics=quiz.related_topics.clone() />
                }
                .into_any()
            }}

            // submit button, score or reveal footer
            {move || match mode.get() {
                DisplayMode::Taking if !attempt.with(QuizAttempt::is_submitted) => Some(view! {
                    <div class="submit-container">
                        <button class="submit-btn" on:click=submit>"Submit Quiz"</button>
                    </div>
                }.into_any()),
                DisplayMode::Taking => {
                    let score = quiz.with(|q| attempt.with(|a| a.score(q)));
                    let total = quiz.with(|q| q.questions.len());
                    Some(view! {
                        <div class="score-container">
                            <h3>"🎯 You scored "{score}" / "{total}</h3>
                        </div>
                    }.into_any())
                }
                DisplayMode::Reveal => Some(view! {
                    <div class="score-container view-mode">
                        <p>"✅ Viewing All Correct Answers"</p>
                    </div>
                }.into_any()),
                DisplayMode::Inert => None,
            }}
        </div>
    }
}

fn question_card(
    index: usize,
    question: &Question,
    mode: DisplayMode,
    state: &QuizAttempt,
    attempt: RwSignal<QuizAttempt>,
) -> impl IntoView {
    let card_class = match state.card_verdict(mode, index, question) {
        Some(true) => "quiz-card correct-card",
        Some(false) => "quiz-card wrong-card",
        None => "quiz-card",
    };

    let options = question
        .options
        .iter()
        .map(|option| {
            let mark = state.option_mark(mode, index, question, option);
            let picked = option.clone();

            view! {
                <li
                    class=mark.class()
                    on:click=move |_| attempt.update(|a| {
                        a.select(mode, index, &picked);
                    })
                >
                    {option.clone()}
                    {mark.badge.map(|badge| view! { <span>" "{badge}</span> })}
                </li>
            }
        })
        .collect::<Vec<_>>();

    let explanation = question
        .explanation
        .clone()
        .filter(|text| !text.trim().is_empty() && state.shows_explanation(mode));

    view! {
        <div class=card_class>
            <div class="question-header">
                <strong>{index + 1}". "{question.question.clone()}</strong>
                {question.difficulty.map(|level| view! {
                    <span class=format!("badge {}", level.as_str())>{level.as_str()}</span>
                })}
            </div>

            <ul class="option-list">{options}</ul>

            {explanation.map(|text| view! {
                <p class="explanation">"📝 "<strong>"Explanation:"</strong>" "{text}</p>
            })}
        </div>
    }
}

#[component]
fn RelatedTopics(topics: Vec<String>) -> impl IntoView {
    (!topics.is_empty()).then(|| view! {
        <div class="related-topics">
            <h4>"Related topics"</h4>
            <ul>
                {topics.into_iter().map(|topic| view! { <li>{topic}</li> }).collect::<Vec<_>>()}
            </ul>
        </div>
    })
}
