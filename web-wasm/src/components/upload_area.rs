//! アップロードエリアコンポーネント
//!
//! ドラッグ&ドロップとクリック選択はどちらも `on_file` に1ファイルを渡す。

use crate::app::AppState;
use crop_detect_common::intake::ACCEPT_ATTRIBUTE;
use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(state: AppState, on_file: F) -> impl IntoView
where
    F: Fn(File) + 'static + Clone + Send,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref = NodeRef::<Input>::new();
    let is_enabled = move || state.intake_open.get();

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if !is_enabled() {
                return;
            }

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if is_enabled() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_| {
        if !is_enabled() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
        // 同じファイルを選び直しても change が発火するように
        input.set_value("");
    };

    view! {
        <input
            type="file"
            accept=ACCEPT_ATTRIBUTE
            style="display: none"
            node_ref=input_ref
            on:change=on_change
        />
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if !is_enabled() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:click=on_click
        >
            {move || match state.preview_url.get() {
                Some(url) => view! {
                    <img class="upload-preview" src=url alt=state.file_name.get().unwrap_or_default() />
                }
                .into_any(),
                None => view! {
                    <div class="upload-icon">"📷"</div>
                    <p>"Drag and drop your crop image here, or click to browse"</p>
                    <p class="text-muted">"Supports JPG, JPEG, PNG (max 10MB)"</p>
                }
                .into_any(),
            }}
            {move || state.intake_error.get().map(|message| view! {
                <p class="upload-error">{message}</p>
            })}
        </div>
    }
}
