//! ==============================================================================
//! lib.rs - Article Quiz Dashboard
//! ==============================================================================
//!
//! purpose:
//!     leptos wasm front end for the quiz service. turns an article url
//!     into a multiple-choice quiz, lets the user take it or reveal the
//!     answers, and browses previously generated quizzes.
//!
//! architecture:
//!     - leptos csr (client-side rendering)
//!     - compiled to wasm, runs in browser
//!     - calls workers/quiz-api via fetch
//!     - tab state lives in `shared` state machines held in signals
//!
//! ==============================================================================

use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Title};
use wasm_bindgen::prelude::*;

mod api;
mod components;

use components::{GenerateTab, Header, HistoryTab, Tab, TabNav};

// ==============================================================================
// main entry point
// ==============================================================================

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("quiz dashboard starting, api at {}", api::API_BASE);
    mount_to_body(App);
}

// ==============================================================================
// app component
// ==============================================================================

#[component]
fn App() -> impl IntoView {
    provide_meta_context();

    // track active tab
    let (active_tab, set_active_tab) = signal(Tab::Generate);

    view! {
        <Title text="AI Wiki Quiz Generator" />
        <Header />
        <div class="container">
            <TabNav active_tab=active_tab set_active_tab=set_active_tab />

            <Show when=move || active_tab.get() == Tab::Generate>
                <GenerateTab />
            </Show>

            <Show when=move || active_tab.get() == Tab::History>
                <HistoryTab />
            </Show>
        </div>
    }
}
