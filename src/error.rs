use crop_detect_common::{IntakeError, SessionError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropDetectError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("{0}")]
    Intake(#[from] IntakeError),

    #[error("セッションエラー: {0}")]
    Session(#[from] SessionError),

    #[error("解析エラー: {0}")]
    Analysis(String),

    #[error("サーバエラー: {0}")]
    Server(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

impl From<crop_detect_common::Error> for CropDetectError {
    fn from(err: crop_detect_common::Error) -> Self {
        use crop_detect_common::Error;

        match err {
            Error::Intake(e) => CropDetectError::Intake(e),
            Error::Session(e) => CropDetectError::Session(e),
            Error::Json(e) => CropDetectError::JsonParse(e),
            Error::Config(msg) => CropDetectError::Config(msg),
            Error::Preview(msg) => CropDetectError::ImageLoad(msg),
        }
    }
}

impl From<dialoguer::Error> for CropDetectError {
    fn from(err: dialoguer::Error) -> Self {
        CropDetectError::Prompt(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CropDetectError>;
