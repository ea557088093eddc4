//! Generate Quiz tab component

use std::time::Duration;

use leptos::prelude::*;
use shared::{GenerateForm, PreviewState, PreviewTicket, ViewMode, PREVIEW_DEBOUNCE_MS};

use crate::api;
use crate::components::{ModeBar, QuizDisplay};

#[component]
pub fn GenerateTab() -> impl IntoView {
    let form = RwSignal::new(GenerateForm::new());
    // at most one pending validation; replaced on every keystroke
    let timer = StoredValue::new(None::<TimeoutHandle>);
    on_cleanup(move || {
        if let Some(handle) = timer.try_get_value().flatten() {
            handle.clear();
        }
    });

    let has_quiz = Memo::new(move |_| form.with(|f| f.quiz().is_some()));
    let quiz = Memo::new(move |_| form.with(|f| f.quiz().cloned().unwrap_or_default()));
    let mode = Memo::new(move |_| form.with(GenerateForm::mode));

    // debounce fired: validate unless newer input took over
    let validate = move |ticket: PreviewTicket| {
        timer.set_value(None);
        let Some(url) = form.try_update(|f| f.begin_preview(ticket)).flatten() else {
            return;
        };

        leptos::task::spawn_local(async move {
            let result = api::preview_url(&url).await;
            if let Err(e) = &result {
                log::warn!("preview of {} failed: {}", url, e);
            }
            form.update(|f| f.finish_preview(result));
        });
    };

    let on_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);

        if let Some(handle) = timer.get_value() {
            handle.clear();
        }
        timer.set_value(None);

        let Some(ticket) = form.try_update(|f| f.input(value)).flatten() else {
            return;
        };

        let delay = Duration::from_millis(u64::from(PREVIEW_DEBOUNCE_MS));
        match set_timeout_with_handle(move || validate(ticket), delay) {
            Ok(handle) => timer.set_value(Some(handle)),
            Err(e) => log::error!("could not schedule url validation: {:?}", e),
        }
    };

    // generate action
    let generate = move |_| {
        let Some(url) = form.try_update(GenerateForm::begin_generate).flatten() else {
            return;
        };

        leptos::task::spawn_local(async move {
            let result = api::generate_quiz(&url).await;
            if let Err(e) = &result {
                log::error!("quiz generation for {} failed: {}", url, e);
            }
            form.update(|f| f.finish_generate(result));
        });
    };

    view! {
        <div class="card generate-container">
            <h2>"🧠 Generate Quiz"</h2>
            <p style="color: var(--text-secondary); margin-bottom: 1rem; font-size: 0.875rem;">
                "Paste a Wikipedia article link. The title is checked as you type."
            </p>

            <div class="input-group">
                <input
                    type="text"
                    class="url-input"
                    placeholder="Enter article URL..."
                    prop:value=move || form.with(|f| f.url().to_string())
                    on:input=on_input
                />
                <button
                    class="generate-button"
                    on:click=generate
                    disabled=move || form.with(GenerateForm::is_generating)
                >
                    {move || if form.with(GenerateForm::is_generating) {
                        view! { <span class="spinner"></span> " Generating..." }.into_any()
                    } else {
                        view! { "Generate Quiz" }.into_any()
                    }}
                </button>
            </div>

            // preview / validation feedback
            {move || form.with(|f| match f.preview() {
                PreviewState::Checking => Some(view! {
                    <p class="info-text">"Validating URL..."</p>
                }.into_any()),
                PreviewState::Ready(preview) => {
                    let title = preview.title.clone();
                    let url = f.url().to_string();
                    Some(view! {
                        <div class="result success preview-container">
                            <h4>{title}</h4>
                            <p class="preview-url">{url}</p>
                        </div>
                    }.into_any())
                }
                _ => None,
            })}
            {move || form.with(GenerateForm::preview_error).map(|msg| view! {
                <p class="error-text">{msg}</p>
            })}
            {move || form.with(|f| f.error().map(str::to_string)).map(|msg| view! {
                <div class="result error">
                    <div class="result-label">"Error"</div>
                    <div class="result-value">{msg}</div>
                </div>
            })}
        </div>

        <Show when=move || has_quiz.get()>
            <div class="card quiz-section">
                <ModeBar
                    mode=mode
                    on_choose=Callback::new(move |m: ViewMode| form.update(|f| f.choose_mode(m)))
                    on_reset=Callback::new(move |_: ()| form.update(GenerateForm::reset_mode))
                />
                <QuizDisplay
                    quiz=quiz
                    quiz_mode=Signal::derive(move || mode.get().quiz_mode())
                    reveal_answers=Signal::derive(move || mode.get().reveal_answers())
                />
            </div>
        </Show>
    }
}
