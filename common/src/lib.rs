//! Crop Detect Common Library
//!
//! CLI・HTTP・Web(WASM)で共有されるワークフローの中核:
//! アップロード受付 → 内容検証 → 診断選択 → 表示状態

pub mod types;
pub mod error;
pub mod config;
pub mod intake;
pub mod validator;
pub mod catalog;
pub mod classifier;
pub mod session;
pub mod auth;

pub use types::{
    AnalysisOutcome, ConfidenceTier, DiagnosisRecord, FileDescriptor, RejectionReason,
    UploadCandidate, ValidationVerdict,
};
pub use error::{Error, IntakeError, Result, SessionError};
pub use config::AnalysisConfig;
pub use intake::{check_file, mime_type_from_name, submit, PreviewAllocator, ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES};
#[cfg(feature = "data-uri")]
pub use intake::DataUriPreviews;
pub use validator::{rejection_message, KeywordHeuristic, KeywordHits};
pub use catalog::{select, DIAGNOSIS_CATALOG, SAMPLE_DETECTIONS};
pub use classifier::{Classifier, DemoClassifier};
pub use session::{run_analysis, AnalysisSession, AnalysisTicket, PresenterView, SessionPhase, UNEXPECTED_FAILURE_MESSAGE};
pub use auth::{AuthSession, AuthStore, MemoryAuthStore};
