//! 解析ワークフローの実行（CLI・HTTP共通）
//!
//! 受付 → 模擬推論待ち → 画像読込確認 → 検証 → 診断選択。
//! 遅延中は分類器のロックを持たない。

mod types;

pub use types::{AnalysisReport, ReportStatus};

use crate::error::{CropDetectError, Result};
use crate::scanner;
use crop_detect_common::{
    check_file, run_analysis, AnalysisSession, Classifier, DataUriPreviews, FileDescriptor,
    DIAGNOSIS_CATALOG,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tokio::sync::Mutex;

/// 解析のオプション
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeOptions {
    /// 推論待ちの模擬遅延
    pub delay: Duration,
    /// スピナーを表示するか
    pub show_progress: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(3000),
            show_progress: false,
        }
    }
}

/// パスの画像を解析
///
/// 受付判定はメタデータで先に行い、通ったものだけ読み込む。
/// 読込のI/Oエラーは想定外エラー（Failed）の結果として返す。
pub async fn analyze_file<C: Classifier>(
    path: &Path,
    classifier: &Mutex<C>,
    options: AnalyzeOptions,
) -> Result<AnalysisReport> {
    let descriptor = scanner::describe(path)?;
    check_file(&descriptor)?;

    match scanner::read_bounded(path) {
        Ok(bytes) => {
            // メタデータのサイズが当てにならないファイル（/proc 等）は実サイズで判定
            let descriptor = FileDescriptor::new(
                descriptor.name,
                descriptor.mime_type,
                descriptor.byte_size.max(bytes.len() as u64),
            );
            analyze_upload(&descriptor, &bytes, classifier, options).await
        }
        Err(CropDetectError::Io(e)) => {
            tracing::warn!(path = %path.display(), "failed to read image: {e}");
            failed_report(&descriptor, e.to_string())
        }
        Err(e) => Err(e),
    }
}

/// 読込失敗を Failed の結果にする
fn failed_report(descriptor: &FileDescriptor, detail: String) -> Result<AnalysisReport> {
    let mut session = AnalysisSession::new(DataUriPreviews::new());
    let ticket = session.submit(descriptor, &[])?;
    session.record_failure(ticket, detail)?;

    let report = AnalysisReport::from_session(&session, None)
        .ok_or_else(|| CropDetectError::Analysis("analysis did not complete".into()))?;
    session.reset();
    Ok(report)
}

/// アップロード済みの内容を解析
///
/// 受付で弾かれた場合は `CropDetectError::Intake` を返す（検証器は呼ばれない）。
pub async fn analyze_upload<C: Classifier>(
    descriptor: &FileDescriptor,
    bytes: &[u8],
    classifier: &Mutex<C>,
    options: AnalyzeOptions,
) -> Result<AnalysisReport> {
    let mut session = AnalysisSession::new(DataUriPreviews::new());
    let ticket = session.submit(descriptor, bytes)?;

    let spinner = spinner(options.show_progress);
    tokio::time::sleep(options.delay).await;

    let dimensions = match scanner::probe_dimensions(bytes) {
        Ok(dims) => {
            tracing::debug!(width = dims.0, height = dims.1, "image loaded for validation");
            let mut classifier = classifier.lock().await;
            run_analysis(&mut session, &mut *classifier, &DIAGNOSIS_CATALOG, ticket)?;
            Some(dims)
        }
        Err(e) => {
            session.record_failure(ticket, e.to_string())?;
            None
        }
    };
    spinner.finish_and_clear();

    let report = AnalysisReport::from_session(&session, dimensions)
        .ok_or_else(|| CropDetectError::Analysis("analysis did not complete".into()))?;

    session.reset();
    Ok(report)
}

fn spinner(visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
        bar.set_style(style);
    }
    bar.set_message("AI analysis in progress... Analyzing your crop image");
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
