//! 解析セッション（1アップロード分の状態遷移）
//!
//! ```text
//! Idle / AwaitingUpload --submit--> Validating --合格--> Classifying --選択--> Complete(Diagnosed)
//!                                       |                    |
//!                                       +--不合格/失敗--------+----------------> Complete(Rejected|Failed)
//! Complete(*) --reset--> Idle
//! ```
//!
//! 解析中の結果は `AnalysisTicket` を照合してから確定する。
//! 新しいアップロード・キャンセル・リセットで世代が進み、古いチケットの結果は破棄される。
//! プレビューURIはリセット・置換・破棄のどの経路でも解放する。

use crate::classifier::Classifier;
use crate::error::{Error, IntakeError, Result, SessionError};
use crate::intake::{self, PreviewAllocator};
use crate::types::{AnalysisOutcome, DiagnosisRecord, FileDescriptor, RejectionReason, UploadCandidate, ValidationVerdict};
use crate::validator::rejection_message;

/// 想定外エラー時の利用者向けメッセージ
pub const UNEXPECTED_FAILURE_MESSAGE: &str =
    "Unable to analyze the image. Please try again with a valid crop image.";

/// セッションの内部状態
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    Idle,
    /// 直前のファイルを受付で弾いた（受付は開いたまま）
    AwaitingUpload(IntakeError),
    Validating,
    Classifying,
    Complete(AnalysisOutcome),
}

/// 表示側に見せる状態
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterView {
    Empty,
    Loading,
    Rejected {
        reason: Option<RejectionReason>,
        message: String,
    },
    Diagnosis(&'static DiagnosisRecord),
}

/// 解析1回分の世代番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnalysisTicket(u64);

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

pub struct AnalysisSession<P: PreviewAllocator> {
    previews: P,
    phase: SessionPhase,
    candidate: Option<UploadCandidate>,
    generation: u64,
}

impl<P: PreviewAllocator> AnalysisSession<P> {
    pub fn new(previews: P) -> Self {
        Self {
            previews,
            phase: SessionPhase::Idle,
            candidate: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn candidate(&self) -> Option<&UploadCandidate> {
        self.candidate.as_ref()
    }

    pub fn previews(&self) -> &P {
        &self.previews
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 直前の受付エラー
    pub fn intake_error(&self) -> Option<&IntakeError> {
        match &self.phase {
            SessionPhase::AwaitingUpload(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SessionPhase::Validating | SessionPhase::Classifying)
    }

    /// 新しいファイルを受け付けられるか（解析中・結果表示中は不可）
    pub fn is_intake_open(&self) -> bool {
        matches!(self.phase, SessionPhase::Idle | SessionPhase::AwaitingUpload(_))
    }

    pub fn view(&self) -> PresenterView {
        match &self.phase {
            SessionPhase::Idle | SessionPhase::AwaitingUpload(_) => PresenterView::Empty,
            SessionPhase::Validating | SessionPhase::Classifying => PresenterView::Loading,
            SessionPhase::Complete(AnalysisOutcome::Rejected(verdict)) => PresenterView::Rejected {
                reason: verdict.rejection_reason(),
                message: rejection_message(verdict).to_string(),
            },
            SessionPhase::Complete(AnalysisOutcome::Failed(_)) => PresenterView::Rejected {
                reason: None,
                message: UNEXPECTED_FAILURE_MESSAGE.to_string(),
            },
            SessionPhase::Complete(AnalysisOutcome::Diagnosed(record)) => PresenterView::Diagnosis(*record),
        }
    }

    /// ファイルを受け付けて解析を開始する（Empty → Loading）
    ///
    /// 解析中に呼ばれた場合は進行中の解析を置き換える。結果表示中は `reset` が先。
    pub fn submit(&mut self, file: &FileDescriptor, source: &P::Source) -> Result<AnalysisTicket> {
        match self.phase {
            SessionPhase::Complete(_) => {
                return Err(SessionError::InvalidTransition("submit from a terminal view; reset first").into());
            }
            SessionPhase::Validating | SessionPhase::Classifying => {
                tracing::debug!(generation = self.generation, "superseding in-flight analysis");
                self.release_preview();
                self.generation += 1;
            }
            SessionPhase::Idle | SessionPhase::AwaitingUpload(_) => {}
        }

        match intake::submit(file, source, &mut self.previews) {
            Ok(candidate) => {
                self.generation += 1;
                self.candidate = Some(candidate);
                self.phase = SessionPhase::Validating;
                tracing::info!(name = %file.name, generation = self.generation, "analysis started");
                Ok(AnalysisTicket(self.generation))
            }
            Err(Error::Intake(err)) => {
                self.phase = SessionPhase::AwaitingUpload(err.clone());
                Err(Error::Intake(err))
            }
            Err(err) => {
                tracing::warn!(name = %file.name, "preview allocation failed: {err}");
                self.generation += 1;
                self.phase = SessionPhase::Complete(AnalysisOutcome::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    /// チケットが現世代か確認
    pub fn check_ticket(&self, ticket: AnalysisTicket) -> std::result::Result<(), SessionError> {
        if ticket.0 != self.generation {
            return Err(SessionError::Stale {
                ticket: ticket.0,
                current: self.generation,
            });
        }
        Ok(())
    }

    /// 検証結果を確定（Validating → Classifying / Complete(Rejected)）
    pub fn record_verdict(
        &mut self,
        ticket: AnalysisTicket,
        verdict: ValidationVerdict,
    ) -> std::result::Result<(), SessionError> {
        self.check_ticket(ticket)?;
        if self.phase != SessionPhase::Validating {
            return Err(SessionError::InvalidTransition("verdict outside validating phase"));
        }

        self.phase = if verdict.is_valid_crop() {
            SessionPhase::Classifying
        } else {
            tracing::info!(reason = ?verdict.rejection_reason(), "analysis rejected");
            SessionPhase::Complete(AnalysisOutcome::Rejected(verdict))
        };
        Ok(())
    }

    /// 診断レコードを確定（Classifying → Complete(Diagnosed)）
    pub fn record_diagnosis(
        &mut self,
        ticket: AnalysisTicket,
        record: &'static DiagnosisRecord,
    ) -> std::result::Result<(), SessionError> {
        self.check_ticket(ticket)?;
        if self.phase != SessionPhase::Classifying {
            return Err(SessionError::InvalidTransition("diagnosis outside classifying phase"));
        }

        tracing::info!(crop = record.crop_name, disease = record.disease_label, "analysis complete");
        self.phase = SessionPhase::Complete(AnalysisOutcome::Diagnosed(record));
        Ok(())
    }

    /// 想定外エラーで解析を打ち切る（Loading → Complete(Failed)）
    pub fn record_failure(
        &mut self,
        ticket: AnalysisTicket,
        detail: impl Into<String>,
    ) -> std::result::Result<(), SessionError> {
        self.check_ticket(ticket)?;
        if !self.is_loading() {
            return Err(SessionError::InvalidTransition("failure outside loading phase"));
        }

        let detail = detail.into();
        tracing::warn!(%detail, "analysis failed");
        self.phase = SessionPhase::Complete(AnalysisOutcome::Failed(detail));
        Ok(())
    }

    /// 進行中の解析を取り消す（遅れて届いた結果は破棄される）
    pub fn cancel(&mut self) -> bool {
        if !self.is_loading() {
            return false;
        }
        self.release_preview();
        self.generation += 1;
        self.phase = SessionPhase::Idle;
        true
    }

    /// どの状態からでも Idle に戻す
    pub fn reset(&mut self) {
        self.release_preview();
        self.generation += 1;
        self.phase = SessionPhase::Idle;
    }

    fn release_preview(&mut self) {
        if let Some(candidate) = self.candidate.take() {
            self.previews.release(candidate.preview_uri());
        }
    }
}

impl<P: PreviewAllocator> Drop for AnalysisSession<P> {
    fn drop(&mut self) {
        self.release_preview();
    }
}

/// 検証→選択を同期的に実行する（遅延は呼び出し側が先に待つ）
pub fn run_analysis<P, C>(
    session: &mut AnalysisSession<P>,
    classifier: &mut C,
    catalog: &'static [DiagnosisRecord],
    ticket: AnalysisTicket,
) -> std::result::Result<PresenterView, SessionError>
where
    P: PreviewAllocator,
    C: Classifier,
{
    session.check_ticket(ticket)?;

    let verdict = match session.candidate() {
        Some(candidate) => classifier.validate(candidate),
        None => return Err(SessionError::InvalidTransition("no candidate to analyze")),
    };
    session.record_verdict(ticket, verdict)?;

    if verdict.is_valid_crop() {
        match classifier.select(catalog) {
            Some(record) => session.record_diagnosis(ticket, record)?,
            None => session.record_failure(ticket, "diagnosis catalog is empty")?,
        }
    }

    Ok(session.view())
}
