//! HTTPインターフェース
//!
//! - `POST /analyze`: multipart の `file` フィールドを解析
//! - `GET /catalog`: 診断カタログ
//! - `GET /health`

use crate::analyzer::{self, AnalyzeOptions};
use crate::error::{CropDetectError, Result};
use axum::extract::multipart::Field;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use crop_detect_common::{
    check_file, mime_type_from_name, Classifier, DiagnosisRecord, FileDescriptor, IntakeError,
    DIAGNOSIS_CATALOG, MAX_UPLOAD_BYTES,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// multipart のオーバーヘッド分の余裕
const BODY_LIMIT_SLACK: usize = 64 * 1024;

pub struct ServerState<C> {
    classifier: Mutex<C>,
    options: AnalyzeOptions,
}

impl<C> ServerState<C> {
    pub fn new(classifier: C, options: AnalyzeOptions) -> Self {
        Self {
            classifier: Mutex::new(classifier),
            options,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse { error: message.into() })).into_response()
}

fn intake_response(err: IntakeError) -> Response {
    let status = match err {
        IntakeError::UnsupportedFormat { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        IntakeError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
    };
    error_response(status, err.to_string())
}

pub fn router<C>(state: Arc<ServerState<C>>) -> Router
where
    C: Classifier + Send + 'static,
{
    Router::new()
        .route("/analyze", post(handle_analyze::<C>))
        .route("/catalog", get(handle_catalog))
        .route("/health", get(|| async { "ok" }))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES as usize + BODY_LIMIT_SLACK))
        .with_state(state)
}

/// 待受を開始し、終了まで処理を続ける
pub async fn serve<C>(addr: &str, state: Arc<ServerState<C>>) -> Result<()>
where
    C: Classifier + Send + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, "analysis server started");

    axum::serve(listener, router(state))
        .await
        .map_err(|e| CropDetectError::Server(e.to_string()))
}

async fn handle_catalog() -> Json<&'static [DiagnosisRecord]> {
    Json(DIAGNOSIS_CATALOG.as_slice())
}

async fn handle_analyze<C>(State(state): State<Arc<ServerState<C>>>, mut multipart: Multipart) -> Response
where
    C: Classifier + Send + 'static,
{
    let mut upload: Option<(FileDescriptor, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("failed to read multipart body: {e}");
                return error_response(e.status(), e.body_text());
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let mime_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| mime_type_from_name(&name).to_string());

        // 形式は中身を読む前に判定する
        if let Err(err) = check_file(&FileDescriptor::new(name.as_str(), mime_type.as_str(), 0)) {
            return intake_response(err);
        }

        let bytes = match read_field(field).await {
            Ok(bytes) => bytes,
            Err(response) => return response,
        };
        let descriptor = FileDescriptor::new(name, mime_type, bytes.len() as u64);
        upload = Some((descriptor, bytes));
    }

    let Some((descriptor, bytes)) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "No file provided.");
    };

    tracing::info!(name = %descriptor.name, mime = %descriptor.mime_type, size = descriptor.byte_size, "upload received");

    match analyzer::analyze_upload(&descriptor, &bytes, &state.classifier, state.options).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(CropDetectError::Intake(err)) => intake_response(err),
        Err(e) => {
            tracing::error!("analysis failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed.")
        }
    }
}

/// フィールドを上限まで読み込む
///
/// 上限を超えた時点で残りは読み捨て、`FileTooLarge` を返す。
/// ボディ上限に達した場合も同じ扱い。
async fn read_field(mut field: Field<'_>) -> std::result::Result<Vec<u8>, Response> {
    let mut bytes = Vec::new();
    let mut received: u64 = 0;

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                received += chunk.len() as u64;
                if received <= MAX_UPLOAD_BYTES {
                    bytes.extend_from_slice(&chunk);
                }
            }
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                tracing::info!(received, "upload exceeded body limit");
                return Err(intake_response(IntakeError::FileTooLarge { byte_size: received }));
            }
            Err(e) => {
                tracing::warn!("failed to read upload bytes: {e}");
                return Err(error_response(e.status(), "Failed to read file data."));
            }
        }
    }

    if received > MAX_UPLOAD_BYTES {
        return Err(intake_response(IntakeError::FileTooLarge { byte_size: received }));
    }
    Ok(bytes)
}
