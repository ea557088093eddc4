//! Quiz History tab component

use leptos::prelude::*;
use shared::{HistoryEntry, HistoryList, HistoryPanel, ViewMode};

use crate::api;
use crate::components::{ModeBar, QuizDisplay};

#[component]
pub fn HistoryTab() -> impl IntoView {
    let panel = RwSignal::new(HistoryPanel::new());

    let list = Memo::new(move |_| panel.with(|p| p.list().clone()));
    let has_selection = Memo::new(move |_| panel.with(|p| p.selected().is_some()));
    let selected = Memo::new(move |_| panel.with(|p| p.selected().cloned().unwrap_or_default()));
    let mode = Memo::new(move |_| panel.with(HistoryPanel::mode));

    // fetch history on mount
    Effect::new(move || {
        panel.update(HistoryPanel::begin_load);
        leptos::task::spawn_local(async move {
            let result = api::get_history().await;
            if let Err(e) = &result {
                log::error!("failed to load history: {}", e);
            }
            panel.update(|p| p.finish_load(result));
        });
    });

    // view action
    let open = move |id: u64| {
        leptos::task::spawn_local(async move {
            let result = api::get_quiz_by_id(id).await;
            if let Err(e) = &result {
                log::error!("failed to load quiz {}: {}", id, e);
            }
            if let Some(message) = panel.try_update(|p| p.finish_open(result)).flatten() {
                if window().alert_with_message(message).is_err() {
                    log::warn!("alert suppressed: {}", message);
                }
            }
        });
    };

    view! {
        <div class="card history-container">
            <h2>"📜 Quiz History"</h2>

            <div class="table-container">
                <table class="table">
                    <thead>
                        <tr>
                            <th>"Title"</th>
                            <th>"URL"</th>
                            <th>"Generated"</th>
                            <th>"Action"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || match list.get() {
                            empty if empty.is_empty() => view! {
                                <tr><td colspan="4" class="table-empty">"No quizzes generated yet."</td></tr>
                            }.into_any(),
                            HistoryList::Loading => view! {
                                <tr><td colspan="4" class="table-loading">"Loading quiz history..."</td></tr>
                            }.into_any(),
                            HistoryList::Failed(msg) => view! {
                                <tr><td colspan="4" class="table-error">"❌ "{msg}</td></tr>
                            }.into_any(),
                            HistoryList::Loaded(rows) => rows
                                .into_iter()
                                .map(|entry| history_row(entry, open))
                                .collect::<Vec<_>>()
                                .into_any(),
                        }}
                    </tbody>
                </table>
            </div>
        </div>

        <Show when=move || has_selection.get()>
            <div class="card history-actions">
                <ModeBar
                    mode=mode
                    on_choose=Callback::new(move |m: ViewMode| panel.update(|p| p.choose_mode(m)))
                    on_reset=Callback::new(move |_: ()| panel.update(HistoryPanel::reset_mode))
                    on_close=Callback::new(move |_: ()| panel.update(HistoryPanel::close))
                    change_label="Change"
                />
                <QuizDisplay
                    quiz=selected
                    quiz_mode=Signal::derive(move || mode.get().quiz_mode())
                    reveal_answers=Signal::derive(move || mode.get().reveal_answers())
                />
            </div>
        </Show>
    }
}

fn history_row(entry: HistoryEntry, open: impl Fn(u64) + Copy + 'static) -> impl IntoView {
    let id = entry.id;
    let generated = entry
        .date_generated
        .as_deref()
        .and_then(|stamp| stamp.split('T').next())
        .unwrap_or("-")
        .to_string();

    view! {
        <tr>
            <td>{entry.title}</td>
            <td class="table-url">{entry.url}</td>
            <td>{generated}</td>
            <td>
                <button class="view-button" on:click=move |_| open(id)>"View"</button>
            </td>
        </tr>
    }
}
