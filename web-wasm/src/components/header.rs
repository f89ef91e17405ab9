//! ヘッダーコンポーネント

use crop_detect_common::AuthSession;
use leptos::prelude::*;

#[component]
pub fn Header(auth: AuthSession) -> impl IntoView {
    let greeting = auth.display_name().map(|name| format!("Welcome, {}", name));

    view! {
        <header class="header">
            <h1>"🌱 Crop Disease Detection"</h1>
            {greeting.map(|text| view! { <span class="header-user">{text}</span> })}
        </header>
    }
}
