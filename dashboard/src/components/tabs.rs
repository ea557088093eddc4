//! Tab navigation component

use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Generate,
    History,
}

#[component]
pub fn TabNav(
    active_tab: ReadSignal<Tab>,
    set_active_tab: WriteSignal<Tab>,
) -> impl IntoView {
    view! {
        <div class="tabs">
            <button
                class=move || if active_tab.get() == Tab::Generate { "tab active" } else { "tab" }
                on:click=move |_| set_active_tab.set(Tab::Generate)
            >
                "🧠 Generate Quiz"
            </button>
            <button
                class=move || if active_tab.get() == Tab::History { "tab active" } else { "tab" }
                on:click=move |_| set_active_tab.set(Tab::History)
            >
                "📜 History"
            </button>
        </div>
    }
}
