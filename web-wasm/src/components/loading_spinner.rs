//! 解析中の表示

use leptos::prelude::*;

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="spinner" />
            <p class="progress-text">"AI analysis in progress..."</p>
            <p class="text-muted">"Analyzing your crop image"</p>
        </div>
    }
}
