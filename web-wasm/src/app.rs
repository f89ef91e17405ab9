//! メインアプリケーションコンポーネント

use crate::auth_store::BrowserAuthStore;
use crate::components::{
    header::Header,
    loading_spinner::LoadingSpinner,
    rejection_view::RejectionView,
    results_display::ResultsDisplay,
    sample_results::SampleResults,
    upload_area::UploadArea,
};
use crate::preview::ObjectUrlPreviews;
use crop_detect_common::{
    run_analysis, AnalysisConfig, AnalysisSession, AnalysisTicket, AuthStore, DemoClassifier,
    FileDescriptor, PresenterView, SessionError, DIAGNOSIS_CATALOG,
};
use gloo::timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;

/// 推論待ちの模擬遅延
pub const ANALYSIS_DELAY_MS: u32 = 3000;

/// アプリケーションの状態
///
/// セッションと分類器は画面側から直接触らず、`submit` / `reset` 経由で操作する。
#[derive(Clone, Copy)]
pub struct AppState {
    session: StoredValue<AnalysisSession<ObjectUrlPreviews>, LocalStorage>,
    classifier: StoredValue<DemoClassifier, LocalStorage>,
    pub view: RwSignal<PresenterView>,
    pub preview_url: RwSignal<Option<String>>,
    pub file_name: RwSignal<Option<String>>,
    pub intake_error: RwSignal<Option<String>>,
    pub intake_open: RwSignal<bool>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            session: StoredValue::new_local(AnalysisSession::new(ObjectUrlPreviews::new())),
            classifier: StoredValue::new_local(DemoClassifier::from_entropy(config)),
            view: RwSignal::new(PresenterView::Empty),
            preview_url: RwSignal::new(None),
            file_name: RwSignal::new(None),
            intake_error: RwSignal::new(None),
            intake_open: RwSignal::new(true),
        }
    }

    /// ドロップ・クリック選択共通の入口
    pub fn submit(&self, file: File) {
        if let Some(ticket) = self.begin(&file) {
            let state = *self;
            spawn_local(async move {
                TimeoutFuture::new(ANALYSIS_DELAY_MS).await;
                state.finish(ticket);
            });
        }
    }

    /// 受付のみ行い、解析中になればチケットを返す
    fn begin(&self, file: &File) -> Option<AnalysisTicket> {
        let descriptor = FileDescriptor::new(file.name(), file.type_(), file.size() as u64);
        let result = self.session.try_update_value(|session| session.submit(&descriptor, file))?;
        self.sync();

        match result {
            Ok(ticket) => Some(ticket),
            Err(err) => {
                leptos::logging::log!("upload refused: {err}");
                None
            }
        }
    }

    /// 遅延後に検証→選択を確定（古いチケットの結果は捨てる）
    fn finish(&self, ticket: AnalysisTicket) {
        let classifier = self.classifier;
        let result = self.session.try_update_value(|session| {
            classifier
                .try_update_value(|classifier| run_analysis(session, classifier, &DIAGNOSIS_CATALOG, ticket))
        });

        match result.flatten() {
            Some(Ok(_)) => self.sync(),
            Some(Err(SessionError::Stale { ticket, current })) => {
                leptos::logging::log!("dropping stale analysis result {ticket} (current {current})");
            }
            Some(Err(err)) => {
                leptos::logging::warn!("analysis failed: {err}");
                let committed = self
                    .session
                    .try_update_value(|session| session.record_failure(ticket, err.to_string()));
                if let Some(Err(commit_err)) = committed {
                    leptos::logging::warn!("failed to record analysis failure: {commit_err}");
                }
                self.sync();
            }
            None => {}
        }
    }

    /// 「別の画像を解析」
    pub fn reset(&self) {
        self.session.try_update_value(|session| session.reset());
        self.sync();
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view.get(), PresenterView::Loading)
    }

    /// セッションの状態を表示用シグナルへ反映
    fn sync(&self) {
        let snapshot = self.session.try_with_value(|session| {
            (
                session.view(),
                session.candidate().map(|c| (c.preview_uri().to_string(), c.name().to_string())),
                session.intake_error().map(|e| e.to_string()),
                session.is_intake_open(),
            )
        });

        if let Some((view, candidate, intake_error, intake_open)) = snapshot {
            let (preview_url, file_name) = candidate.unzip();
            self.view.set(view);
            self.preview_url.set(preview_url);
            self.file_name.set(file_name);
            self.intake_error.set(intake_error);
            self.intake_open.set(intake_open);
        }
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(AnalysisConfig::default());
    let auth = BrowserAuthStore.load();

    let on_file = move |file: File| state.submit(file);
    let on_reset = move || state.reset();

    view! {
        <div class="container">
            <Header auth=auth />

            {move || match state.view.get() {
                PresenterView::Empty | PresenterView::Loading => view! {
                    <UploadArea state=state on_file=on_file />
                    <Show when=move || state.is_loading()>
                        <LoadingSpinner />
                    </Show>
                    <Show when=move || matches!(state.view.get(), PresenterView::Empty)>
                        <SampleResults />
                    </Show>
                }
                .into_any(),
                PresenterView::Rejected { reason, message } => view! {
                    <RejectionView reason=reason message=message on_reset=on_reset />
                }
                .into_any(),
                PresenterView::Diagnosis(record) => view! {
                    <ResultsDisplay
                        record=record
                        preview_url=state.preview_url.get_untracked()
                        on_reset=on_reset
                    />
                }
                .into_any(),
            }}
        </div>
    }
}
