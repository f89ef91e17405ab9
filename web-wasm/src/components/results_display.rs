//! 診断結果の表示

use crop_detect_common::{ConfidenceTier, DiagnosisRecord};
use leptos::prelude::*;

/// 信頼度の段階に応じたCSSクラス
pub fn confidence_class(tier: ConfidenceTier) -> &'static str {
    match tier {
        ConfidenceTier::High => "confidence-high",
        ConfidenceTier::Moderate => "confidence-moderate",
        ConfidenceTier::Low => "confidence-low",
    }
}

#[component]
pub fn ResultsDisplay<F>(
    record: &'static DiagnosisRecord,
    preview_url: Option<String>,
    on_reset: F,
) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send,
{
    let tier_class = confidence_class(record.confidence_tier());
    let (status_class, status_icon) = if record.is_healthy {
        ("result-header healthy", "✔")
    } else {
        ("result-header diseased", "⚠")
    };

    view! {
        <div class="results">
            <div class=status_class>
                <span class="status-icon">{status_icon}</span>
                <h2>"Analysis Complete"</h2>
                <p>"AI-powered crop health assessment"</p>
            </div>

            {preview_url.map(|url| view! {
                <div class="result-image">
                    <h3>"Analyzed Image"</h3>
                    <img src=url alt="Analyzed crop" />
                </div>
            })}

            <dl class="result-fields">
                <dt>"Crop Type"</dt>
                <dd>{record.crop_name}</dd>
                <dt>"Health Status"</dt>
                <dd>{record.disease_label}</dd>
                <dt>"Confidence Level"</dt>
                <dd class=tier_class>{format!("{}%", record.confidence_percent)}</dd>
            </dl>
            <div class="confidence-track">
                <div
                    class=format!("confidence-fill {}", tier_class)
                    style=format!("width: {}%", record.confidence_percent)
                />
            </div>

            // 健康な作物には症状・処置を出さない
            <Show when=move || !record.is_healthy>
                <ItemList title="Symptoms" items=record.symptoms ordered=false />
                <ItemList title="Treatment" items=record.treatment_steps ordered=true />
            </Show>
            <ItemList title="Prevention Tips" items=record.prevention_tips ordered=false />

            <button class="btn btn-primary" on:click=move |_| on_reset()>
                "Analyze Another Image"
            </button>
        </div>
    }
}

#[component]
fn ItemList(title: &'static str, items: &'static [&'static str], ordered: bool) -> impl IntoView {
    if items.is_empty() {
        return None;
    }

    let entries = items.iter().map(|item| view! { <li>{*item}</li> }).collect_view();
    Some(view! {
        <section class="result-card">
            <h3>{title}</h3>
            {if ordered {
                view! { <ol>{entries}</ol> }.into_any()
            } else {
                view! { <ul>{entries}</ul> }.into_any()
            }}
        </section>
    })
}
