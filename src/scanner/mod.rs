//! ディスク上の画像ファイル読込
//!
//! ブラウザの File 相当（名前・MIME・サイズ・中身）をパスから組み立てる。
//! 受付判定（形式・サイズ）は読込前に行えるよう、情報と中身を分けて取得する。

use crate::error::{CropDetectError, Result};
use crop_detect_common::{mime_type_from_name, FileDescriptor, MAX_UPLOAD_BYTES};
use std::io::{Cursor, ErrorKind, Read};
use std::path::Path;

/// 読込の試行回数（I/Oエラーのみ再試行）
const READ_ATTEMPTS: usize = 2;

/// 中身を読まずにファイル情報を組み立てる
///
/// サイズはメタデータから取るので、受付判定を読込前に行える。
pub fn describe(path: &Path) -> Result<FileDescriptor> {
    if !path.is_file() {
        return Err(CropDetectError::FileNotFound(path.display().to_string()));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let byte_size = std::fs::metadata(path)?.len();

    Ok(FileDescriptor::new(
        file_name.clone(),
        mime_type_from_name(&file_name),
        byte_size,
    ))
}

/// 中身を読み込む（上限 + 1 バイトで打ち切り）
///
/// 上限を超えたかどうかは呼び出し側の受付判定に任せる。
pub fn read_bounded(path: &Path) -> Result<Vec<u8>> {
    let mut attempt = 1;
    loop {
        match read_once(path) {
            Ok(bytes) => return Ok(bytes),
            Err(e) if attempt < READ_ATTEMPTS && is_transient(e.kind()) => {
                tracing::warn!(path = %path.display(), attempt, "read failed, retrying: {e}");
                attempt += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn read_once(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    std::fs::File::open(path)?
        .take(MAX_UPLOAD_BYTES + 1)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn is_transient(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::Interrupted | ErrorKind::WouldBlock | ErrorKind::TimedOut)
}

/// 画像としてデコードできるか確認し、サイズ（幅, 高さ）を返す
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropDetectError::ImageLoad(e.to_string()))?
        .into_dimensions()
        .map_err(|e| CropDetectError::ImageLoad(e.to_string()))
}
