use chrono::{DateTime, Utc};
use crop_detect_common::{
    AnalysisOutcome, AnalysisSession, DiagnosisRecord, PresenterView, PreviewAllocator,
    SessionPhase, UploadCandidate, ValidationVerdict,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportStatus {
    Diagnosed,
    Rejected,
    Failed,
}

/// 解析1回分の結果（CLIのJSON出力・HTTPレスポンス共通）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub file_name: String,
    pub mime_type: String,
    pub byte_size: u64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<(u32, u32)>,

    pub status: ReportStatus,

    /// 検証器の判定（想定外エラー時はなし）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<ValidationVerdict>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<&'static DiagnosisRecord>,

    /// 不合格・エラー時の利用者向けメッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub analyzed_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// 完了したセッションから生成（未完了なら None）
    pub fn from_session<P: PreviewAllocator>(
        session: &AnalysisSession<P>,
        dimensions: Option<(u32, u32)>,
    ) -> Option<Self> {
        let SessionPhase::Complete(outcome) = session.phase() else {
            return None;
        };
        let candidate = session.candidate()?;

        let (status, verdict, diagnosis) = match outcome {
            AnalysisOutcome::Rejected(verdict) => (ReportStatus::Rejected, Some(*verdict), None),
            AnalysisOutcome::Diagnosed(record) => {
                (ReportStatus::Diagnosed, Some(ValidationVerdict::accepted()), Some(*record))
            }
            AnalysisOutcome::Failed(_) => (ReportStatus::Failed, None, None),
        };

        let message = match session.view() {
            PresenterView::Rejected { message, .. } => Some(message),
            _ => None,
        };

        Some(Self::build(candidate, dimensions, status, verdict, diagnosis, message))
    }

    fn build(
        candidate: &UploadCandidate,
        dimensions: Option<(u32, u32)>,
        status: ReportStatus,
        verdict: Option<ValidationVerdict>,
        diagnosis: Option<&'static DiagnosisRecord>,
        message: Option<String>,
    ) -> Self {
        Self {
            file_name: candidate.name().to_string(),
            mime_type: candidate.mime_type().to_string(),
            byte_size: candidate.byte_size(),
            dimensions,
            status,
            verdict,
            diagnosis,
            message,
            analyzed_at: Utc::now(),
        }
    }
}
