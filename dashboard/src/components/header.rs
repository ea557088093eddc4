//! Header component

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <div>
                <h1>"AI Wiki Quiz Generator"</h1>
                <p class="subtitle">"Turn any Wikipedia article into a quiz"</p>
            </div>
            <span class="badge">"Rust + WASM"</span>
        </header>
    }
}
