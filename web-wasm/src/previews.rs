//! Object URL によるプレビュー

use pantry_pal_common::{ImagePayload, Preview, PreviewProvider};
use web_sys::{Blob, BlobPropertyBag, Url};

/// 画像バイトから `blob:` URL を作り、削除時に revoke する
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectUrlPreviews;

fn create_object_url(payload: &ImagePayload) -> Option<String> {
    let bytes = js_sys::Uint8Array::from(&payload.bytes[..]);
    let parts = js_sys::Array::of1(&bytes);
    let options = BlobPropertyBag::new();
    options.set_type(&payload.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    Url::create_object_url_with_blob(&blob).ok()
}

impl PreviewProvider for ObjectUrlPreviews {
    fn acquire(&self, payload: &ImagePayload) -> Preview {
        match create_object_url(payload) {
            Some(url) => Preview::new(url),
            None => {
                gloo::console::warn!(format!("preview unavailable for {}", payload.file_name));
                Preview::new(String::new())
            }
        }
    }

    fn release(&self, preview: &Preview) {
        if preview.as_str().starts_with("blob:") {
            let _ = Url::revoke_object_url(preview.as_str());
        }
    }
}
