//! 不合格・解析失敗の表示

use crop_detect_common::RejectionReason;
use leptos::prelude::*;

/// 不合格理由ごとのアイコン
pub fn rejection_icon(reason: Option<RejectionReason>) -> &'static str {
    match reason {
        Some(RejectionReason::Human) => "🧑",
        Some(RejectionReason::Animal) => "🐾",
        Some(RejectionReason::Object) => "📦",
        Some(RejectionReason::NotDetectable) => "🔍",
        None => "⚠",
    }
}

#[component]
pub fn RejectionView<F>(reason: Option<RejectionReason>, message: String, on_reset: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send,
{
    view! {
        <div class="rejection">
            <div class="rejection-icon">{rejection_icon(reason)}</div>
            <p class="rejection-message">{message}</p>
            <button class="btn btn-primary" on:click=move |_| on_reset()>
                "Analyze Another Image"
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_rejection_icon_for_failure() {
        assert_eq!(rejection_icon(None), "⚠");
        assert_eq!(rejection_icon(Some(RejectionReason::Animal)), "🐾");
    }
}
