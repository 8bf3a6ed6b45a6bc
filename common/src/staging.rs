//! 画像ステージング
//!
//! 送信前の食材写真をカテゴリ別に保持する。プレビューの取得と解放は
//! [`PreviewProvider`] 経由で必ず対にする（ブラウザではObject URL）。

use crate::options::IngredientCategory;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// ステージング内で一意な画像ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(u64);

impl ImageId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img-{}", self.0)
    }
}

/// 画像のバイナリ本体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Arc<[u8]>,
}

impl ImagePayload {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// 表示用プレビューのハンドル（Object URL やファイルパス）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Preview(String);

impl Preview {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// プレビューの取得・解放
pub trait PreviewProvider {
    fn acquire(&self, payload: &ImagePayload) -> Preview;
    fn release(&self, preview: &Preview);
}

/// ファイル名をそのままプレビューとして使う（解放処理なし）
#[derive(Debug, Clone, Copy, Default)]
pub struct FileNamePreviews;

impl PreviewProvider for FileNamePreviews {
    fn acquire(&self, payload: &ImagePayload) -> Preview {
        Preview::new(payload.file_name.clone())
    }

    fn release(&self, _preview: &Preview) {}
}

/// ステージング済み画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub id: ImageId,
    pub payload: ImagePayload,
    pub preview: Preview,
}

/// カテゴリ別の画像コレクション
///
/// IDは解放後も再利用しない（カウンタはclearでも戻さない）
#[derive(Debug, Clone, Default)]
pub struct ImageStaging {
    assets: BTreeMap<IngredientCategory, Vec<ImageAsset>>,
    next_id: u64,
}

impl PartialEq for ImageStaging {
    fn eq(&self, other: &Self) -> bool {
        self.ordered().eq(other.ordered())
    }
}

impl ImageStaging {
    pub fn new() -> Self {
        Self::default()
    }

    /// 画像を追加し、追加されたアセットを返す
    pub fn add(
        &mut self,
        category: IngredientCategory,
        files: Vec<ImagePayload>,
        previews: &dyn PreviewProvider,
    ) -> Vec<ImageAsset> {
        let mut added = Vec::with_capacity(files.len());
        for payload in files {
            let id = ImageId(self.next_id);
            self.next_id += 1;
            let preview = previews.acquire(&payload);
            added.push(ImageAsset { id, payload, preview });
        }

        tracing::debug!(category = %category, count = added.len(), "staged images");
        self.assets
            .entry(category)
            .or_default()
            .extend(added.iter().cloned());
        added
    }

    /// 画像を削除してプレビューを解放。見つからなければfalse
    pub fn remove(
        &mut self,
        category: IngredientCategory,
        id: ImageId,
        previews: &dyn PreviewProvider,
    ) -> bool {
        let Some(list) = self.assets.get_mut(&category) else {
            return false;
        };
        let Some(index) = list.iter().position(|asset| asset.id == id) else {
            return false;
        };

        let asset = list.remove(index);
        previews.release(&asset.preview);
        if list.is_empty() {
            self.assets.remove(&category);
        }
        true
    }

    /// 全画像のプレビューを解放して空にする
    pub fn clear(&mut self, previews: &dyn PreviewProvider) {
        for asset in self.assets.values().flatten() {
            previews.release(&asset.preview);
        }
        self.assets.clear();
    }

    pub fn get(&self, category: IngredientCategory) -> &[ImageAsset] {
        self.assets
            .get(&category)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// カテゴリ順（野菜→果物→タンパク質→葉物）に全画像を返す
    pub fn ordered(&self) -> impl Iterator<Item = &ImageAsset> {
        self.assets.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.assets.values().map(|list| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// 取得・解放を記録するプロバイダ
    #[derive(Debug, Default)]
    pub(crate) struct RecordingPreviews {
        pub acquired: Mutex<Vec<String>>,
        pub released: Mutex<Vec<String>>,
    }

    impl RecordingPreviews {
        pub fn released(&self) -> Vec<String> {
            self.released.lock().unwrap().clone()
        }

        pub fn acquired(&self) -> Vec<String> {
            self.acquired.lock().unwrap().clone()
        }
    }

    impl PreviewProvider for RecordingPreviews {
        fn acquire(&self, payload: &ImagePayload) -> Preview {
            let mut acquired = self.acquired.lock().unwrap();
            let handle = format!("blob:{}#{}", payload.file_name, acquired.len());
            acquired.push(handle.clone());
            Preview::new(handle)
        }

        fn release(&self, preview: &Preview) {
            self.released.lock().unwrap().push(preview.as_str().to_string());
        }
    }

    pub(crate) fn payload(name: &str) -> ImagePayload {
        ImagePayload::new(name, "image/jpeg", name.as_bytes().to_vec())
    }

    // =============================================
    // add テスト
    // =============================================

    #[test]
    fn test_add_assigns_unique_ids() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();

        let added = staging.add(
            IngredientCategory::Vegetables,
            vec![payload("carrot.jpg"), payload("carrot.jpg")],
            &previews,
        );

        assert_eq!(added.len(), 2);
        assert_ne!(added[0].id, added[1].id);
        assert_eq!(staging.get(IngredientCategory::Vegetables).len(), 2);
        assert_eq!(previews.acquired().len(), 2);
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        staging.add(IngredientCategory::Fruits, vec![payload("a.jpg")], &previews);
        staging.add(IngredientCategory::Fruits, vec![payload("b.jpg"), payload("c.jpg")], &previews);

        let names: Vec<_> = staging
            .get(IngredientCategory::Fruits)
            .iter()
            .map(|a| a.payload.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg", "c.jpg"]);
    }

    #[test]
    fn test_ordered_follows_category_order() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        staging.add(IngredientCategory::Greens, vec![payload("basil.jpg")], &previews);
        staging.add(IngredientCategory::Vegetables, vec![payload("onion.jpg")], &previews);
        staging.add(IngredientCategory::Proteins, vec![payload("tofu.jpg")], &previews);
        staging.add(IngredientCategory::Vegetables, vec![payload("leek.jpg")], &previews);

        let names: Vec<_> = staging
            .ordered()
            .map(|a| a.payload.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["onion.jpg", "leek.jpg", "tofu.jpg", "basil.jpg"]);
    }

    // =============================================
    // remove / clear テスト
    // =============================================

    #[test]
    fn test_remove_releases_exactly_once() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        let added = staging.add(
            IngredientCategory::Proteins,
            vec![payload("egg.jpg"), payload("chicken.jpg")],
            &previews,
        );
        let target = added[0].id;

        assert!(staging.remove(IngredientCategory::Proteins, target, &previews));
        assert!(!staging.remove(IngredientCategory::Proteins, target, &previews));

        assert!(staging
            .get(IngredientCategory::Proteins)
            .iter()
            .all(|a| a.id != target));
        assert_eq!(previews.released(), vec![added[0].preview.as_str().to_string()]);
    }

    #[test]
    fn test_remove_wrong_category_is_noop() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        let added = staging.add(IngredientCategory::Fruits, vec![payload("kiwi.jpg")], &previews);

        assert!(!staging.remove(IngredientCategory::Vegetables, added[0].id, &previews));
        assert_eq!(staging.len(), 1);
        assert!(previews.released().is_empty());
    }

    #[test]
    fn test_clear_releases_all() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        staging.add(IngredientCategory::Fruits, vec![payload("a.jpg")], &previews);
        staging.add(IngredientCategory::Greens, vec![payload("b.jpg")], &previews);

        staging.clear(&previews);

        assert!(staging.is_empty());
        assert_eq!(previews.released().len(), 2);
        assert_eq!(staging, ImageStaging::default());
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let previews = RecordingPreviews::default();
        let mut staging = ImageStaging::new();
        let first = staging.add(IngredientCategory::Fruits, vec![payload("a.jpg")], &previews);
        staging.clear(&previews);
        let second = staging.add(IngredientCategory::Fruits, vec![payload("a.jpg")], &previews);

        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn test_image_id_display() {
        let previews = FileNamePreviews;
        let mut staging = ImageStaging::new();
        let added = staging.add(IngredientCategory::Fruits, vec![payload("a.jpg")], &previews);
        assert_eq!(added[0].id.to_string(), "img-0");
        assert_eq!(added[0].preview.as_str(), "a.jpg");
    }
}
