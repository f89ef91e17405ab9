//! エラー型定義

use thiserror::Error;

/// アップロード受付（Upload Intake）で弾かれた理由
///
/// ここで弾かれたファイルは検証器（Validator）に渡らない。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please upload only JPG, JPEG, or PNG images.")]
    UnsupportedFormat { mime_type: String },

    #[error("File size must be less than 10MB.")]
    FileTooLarge { byte_size: u64 },
}

/// セッション状態遷移のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 新しいアップロードやキャンセルで置き換えられた解析の結果
    #[error("stale analysis result (ticket {ticket}, current {current})")]
    Stale { ticket: u64, current: u64 },

    #[error("invalid transition: {0}")]
    InvalidTransition(&'static str),
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Preview error: {0}")]
    Preview(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intake_error_messages() {
        let err = IntakeError::UnsupportedFormat { mime_type: "image/gif".into() };
        assert_eq!(err.to_string(), "Please upload only JPG, JPEG, or PNG images.");

        let err = IntakeError::FileTooLarge { byte_size: 11 * 1024 * 1024 };
        assert_eq!(err.to_string(), "File size must be less than 10MB.");
    }

    #[test]
    fn test_error_from_intake() {
        let error: Error = IntakeError::FileTooLarge { byte_size: 1 }.into();
        assert!(matches!(error, Error::Intake(IntakeError::FileTooLarge { .. })));
        assert!(error.to_string().starts_with("Intake error"));
    }

    #[test]
    fn test_error_from_session() {
        let error: Error = SessionError::Stale { ticket: 1, current: 2 }.into();
        let display = format!("{}", error);
        assert!(display.contains("stale"));
        assert!(display.contains("ticket 1"));
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("rejection_probability out of range".to_string());
        assert_eq!(
            format!("{}", error),
            "Config error: rejection_probability out of range"
        );
    }
}
