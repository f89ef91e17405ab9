//! アップロード受付（Upload Intake）
//!
//! ドラッグ&ドロップもクリック選択も同じ `submit` を通す。
//! 形式・サイズ制約に違反したファイルはここで弾き、検証器には渡さない。

use crate::error::{Error, IntakeError, Result};
use crate::types::{FileDescriptor, UploadCandidate};

/// 受付可能なMIMEタイプ
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// 最大ファイルサイズ（10MiB）
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// `<input accept=...>` 用の文字列
pub const ACCEPT_ATTRIBUTE: &str = "image/jpeg,image/jpg,image/png";

/// プレビューURIの確保と解放
///
/// ブラウザでは object URL、ネイティブでは data URI。
/// 確保したURIはセッションのリセット・置換・破棄時に必ず `release` される。
pub trait PreviewAllocator {
    /// プレビュー生成元（バイト列やブラウザの File）
    type Source: ?Sized;

    fn allocate(&mut self, file: &FileDescriptor, source: &Self::Source) -> Result<String>;

    fn release(&mut self, preview_uri: &str);
}

/// 形式・サイズのみを検査（副作用なし）
///
/// 形式を先に検査する。
pub fn check_file(file: &FileDescriptor) -> std::result::Result<(), IntakeError> {
    let mime_type = file.mime_type.to_ascii_lowercase();
    if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(IntakeError::UnsupportedFormat { mime_type });
    }

    if file.byte_size > MAX_UPLOAD_BYTES {
        return Err(IntakeError::FileTooLarge { byte_size: file.byte_size });
    }

    Ok(())
}

/// ファイルを受け付けてプレビューを確保する
pub fn submit<P: PreviewAllocator>(
    file: &FileDescriptor,
    source: &P::Source,
    previews: &mut P,
) -> Result<UploadCandidate> {
    if let Err(err) = check_file(file) {
        tracing::debug!(name = %file.name, mime = %file.mime_type, size = file.byte_size, "intake refused: {err}");
        return Err(Error::Intake(err));
    }

    let preview_uri = previews.allocate(file, source)?;
    tracing::debug!(name = %file.name, size = file.byte_size, "intake accepted");

    Ok(UploadCandidate::new(file, preview_uri))
}

/// ファイル名の拡張子からMIMEタイプを推定（ディスク・multipart用）
pub fn mime_type_from_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}

/// data URI によるプレビュー（ネイティブ用）
///
/// data URI 自体は解放不要だが、確保と解放の対応を数えて漏れを検出できるようにする。
#[cfg(feature = "data-uri")]
#[derive(Debug, Default)]
pub struct DataUriPreviews {
    outstanding: usize,
}

#[cfg(feature = "data-uri")]
impl DataUriPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未解放のプレビュー数
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

#[cfg(feature = "data-uri")]
impl PreviewAllocator for DataUriPreviews {
    type Source = [u8];

    fn allocate(&mut self, file: &FileDescriptor, source: &[u8]) -> Result<String> {
        use base64::Engine;

        let encoded = base64::engine::general_purpose::STANDARD.encode(source);
        self.outstanding += 1;
        Ok(format!("data:{};base64,{}", file.mime_type.to_ascii_lowercase(), encoded))
    }

    fn release(&mut self, _preview_uri: &str) {
        self.outstanding = self.outstanding.saturating_sub(1);
    }
}
