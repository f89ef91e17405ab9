//! ブラウザの object URL によるプレビュー

use crop_detect_common::{Error, FileDescriptor, PreviewAllocator, Result};
use web_sys::{File, Url};

/// `URL.createObjectURL` で確保し `URL.revokeObjectURL` で解放する
#[derive(Debug, Default)]
pub struct ObjectUrlPreviews {
    outstanding: usize,
}

impl ObjectUrlPreviews {
    pub fn new() -> Self {
        Self::default()
    }

    /// 未解放のURL数
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }
}

impl PreviewAllocator for ObjectUrlPreviews {
    type Source = File;

    fn allocate(&mut self, file: &FileDescriptor, source: &File) -> Result<String> {
        let url = Url::create_object_url_with_blob(source)
            .map_err(|e| Error::Preview(format!("{}: {:?}", file.name, e)))?;
        self.outstanding += 1;
        Ok(url)
    }

    fn release(&mut self, preview_uri: &str) {
        if Url::revoke_object_url(preview_uri).is_ok() {
            self.outstanding = self.outstanding.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsValue;
    use wasm_bindgen_test::*;

    fn leaf_file() -> File {
        let parts = js_sys::Array::of1(&JsValue::from_str("fake-png-bytes"));
        File::new_with_str_sequence(&parts, "leaf.png").unwrap()
    }

    #[wasm_bindgen_test]
    fn test_allocate_and_release() {
        let mut previews = ObjectUrlPreviews::new();
        let descriptor = FileDescriptor::new("leaf.png", "image/png", 14);

        let url = previews.allocate(&descriptor, &leaf_file()).unwrap();
        assert!(url.starts_with("blob:"));
        assert_eq!(previews.outstanding(), 1);

        previews.release(&url);
        assert_eq!(previews.outstanding(), 0);
    }
}
