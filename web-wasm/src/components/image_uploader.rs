//! 食材写真のアップロード
//!
//! カテゴリごとにファイル選択・カメラ・ドラッグ&ドロップで画像を受け取り、
//! 読み込んだバイト列を `ImagePayload` として渡す。

use leptos::prelude::*;
use pantry_pal_common::{ImageAsset, ImageId, ImagePayload, IngredientCategory};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{DragEvent, File, FileList, HtmlInputElement};

#[component]
pub fn ImageUploader<V, D, FA, FR>(
    category: IngredientCategory,
    assets: V,
    disabled: D,
    on_added: FA,
    on_remove: FR,
) -> impl IntoView
where
    V: Fn() -> Vec<ImageAsset> + Copy + Send + Sync + 'static,
    D: Fn() -> bool + Copy + Send + Sync + 'static,
    FA: Fn(Vec<ImagePayload>) + Copy + Send + Sync + 'static,
    FR: Fn(ImageId) + Copy + Send + Sync + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(false);
        if disabled() {
            return;
        }
        if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
            read_files(files, on_added);
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled() {
            set_is_dragover.set(true);
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            read_files(files, on_added);
        }
        // 同じファイルを選び直せるように
        input.set_value("");
    };

    view! {
        <div class="uploader">
            <h3>{category.as_str()}</h3>
            <div
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if disabled() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
            >
                <label class="btn btn-secondary btn-small">
                    "📁 Upload"
                    <input
                        type="file"
                        accept="image/*"
                        multiple=true
                        hidden=true
                        prop:disabled=disabled
                        on:change=on_change
                    />
                </label>
                <label class="btn btn-secondary btn-small">
                    "📷 Camera"
                    <input
                        type="file"
                        accept="image/*"
                        capture="environment"
                        hidden=true
                        prop:disabled=disabled
                        on:change=on_change
                    />
                </label>
                <p class="text-muted">"or drop photos here"</p>
            </div>

            <div class="photo-gallery">
                <For
                    each=assets
                    key=|asset| asset.id
                    children=move |asset| {
                        let id = asset.id;
                        view! {
                            <div class="photo-card">
                                <img src=asset.preview.as_str().to_string() alt=asset.payload.file_name.clone() />
                                <button
                                    type="button"
                                    class="remove"
                                    title="Remove"
                                    prop:disabled=disabled
                                    on:click=move |_| on_remove(id)
                                >
                                    "✕"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </div>
    }
}

/// 選択順を保ったまま全ファイルを読み込んで一括で渡す
fn read_files<F>(files: FileList, on_added: F)
where
    F: Fn(Vec<ImagePayload>) + 'static,
{
    let files: Vec<File> = (0..files.length()).filter_map(|i| files.get(i)).collect();
    if files.is_empty() {
        return;
    }

    spawn_local(async move {
        let mut payloads = Vec::with_capacity(files.len());
        for file in files {
            match read_file(&file).await {
                Ok(payload) => payloads.push(payload),
                Err(e) => gloo::console::error!(format!("failed to read {}: {:?}", file.name(), e)),
            }
        }
        if !payloads.is_empty() {
            on_added(payloads);
        }
    });
}

async fn read_file(file: &File) -> Result<ImagePayload, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let mime_type = match file.type_() {
        t if t.is_empty() => "image/jpeg".to_string(),
        t => t,
    };
    Ok(ImagePayload::new(file.name(), mime_type, bytes))
}
