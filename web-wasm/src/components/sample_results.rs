//! 検出例の一覧（固定データ）

use crop_detect_common::SAMPLE_DETECTIONS;
use leptos::prelude::*;

use super::results_display::confidence_class;

#[component]
pub fn SampleResults() -> impl IntoView {
    let cards = SAMPLE_DETECTIONS
        .iter()
        .map(|record| {
            let symptoms = record
                .symptoms
                .iter()
                .map(|symptom| view! { <li>{*symptom}</li> })
                .collect_view();
            view! {
                <div class="sample-card">
                    <h3>{record.crop_name}</h3>
                    <p class="sample-status">{record.disease_label}</p>
                    <p class=confidence_class(record.confidence_tier())>
                        {format!("Confidence {}%", record.confidence_percent)}
                    </p>
                    <ul>{symptoms}</ul>
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="sample-results">
            <h2>"Sample Detection Results"</h2>
            <div class="sample-grid">{cards}</div>
        </section>
    }
}
