//! View / take mode picker shown above a loaded quiz

use leptos::prelude::*;
use shared::ViewMode;

#[component]
pub fn ModeBar(
    #[prop(into)] mode: Signal<ViewMode>,
    on_choose: Callback<ViewMode>,
    on_reset: Callback<()>,
    /// offered next to the mode buttons when set
    #[prop(optional)]
    on_close: Option<Callback<()>>,
    #[prop(default = "Change Mode")] change_label: &'static str,
) -> impl IntoView {
    move || match mode.get().label() {
        None => view! {
            <div class="quiz-mode-buttons">
                <button class="mode-button" on:click=move |_| on_choose.run(ViewMode::View)>
                    "View Answers"
                </button>
                <button class="mode-button" on:click=move |_| on_choose.run(ViewMode::Quiz)>
                    "Take Quiz"
                </button>
                {on_close.map(|close| view! {
                    <button class="mode-button cancel" on:click=move |_| close.run(())>
                        "Close"
                    </button>
                })}
            </div>
        }
        .into_any(),
        Some(label) => view! {
            <div class="selected-mode-row">
                <span class="selected-mode-label">{label}</span>
                <button class="change-mode" on:click=move |_| on_reset.run(())>
                    {change_label}
                </button>
            </div>
        }
        .into_any(),
    }
}
