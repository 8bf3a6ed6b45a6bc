mod loader;

pub use loader::{load_images, load_payload};

use crate::error::{PantryError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub file_name: String,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

fn is_image_extension(ext: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

fn image_info(path: &Path) -> ImageInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    ImageInfo {
        path: path.to_path_buf(),
        file_name,
    }
}

/// フォルダ直下の画像をファイル名順で返す
pub fn scan_folder(folder: &Path) -> Result<Vec<ImageInfo>> {
    if !folder.exists() {
        return Err(PantryError::FileNotFound(folder.display().to_string()));
    }

    let mut images: Vec<ImageInfo> = WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| is_image_extension(&ext.to_string_lossy()))
                .unwrap_or(false)
        })
        .map(|entry| image_info(entry.path()))
        .collect();

    // ファイル名でソート
    images.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(images)
}

/// ファイル・フォルダ混在の指定を展開する（指定順を保持）
///
/// ファイルは拡張子を問わずそのまま使う（中身で判定する）
pub fn collect_images(paths: &[PathBuf]) -> Result<Vec<ImageInfo>> {
    let mut images = Vec::new();
    for path in paths {
        if path.is_dir() {
            images.extend(scan_folder(path)?);
        } else if path.is_file() {
            images.push(image_info(path));
        } else {
            return Err(PantryError::FileNotFound(path.display().to_string()));
        }
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;

    #[test]
    fn test_is_image_extension() {
        assert!(is_image_extension("jpg"));
        assert!(is_image_extension("JPG"));
        assert!(is_image_extension("jpeg"));
        assert!(is_image_extension("png"));
        assert!(is_image_extension("webp"));
        assert!(!is_image_extension("txt"));
        assert!(!is_image_extension("pdf"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(PantryError::FileNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let temp_dir = tempfile::tempdir().unwrap();

        File::create(temp_dir.path().join("tomato.jpg")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("onion.PNG")).unwrap().write_all(b"dummy").unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap().write_all(b"text").unwrap();
        fs::create_dir(temp_dir.path().join("nested")).unwrap();
        File::create(temp_dir.path().join("nested").join("garlic.jpg")).unwrap();

        let result = scan_folder(temp_dir.path()).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["onion.PNG", "tomato.jpg"]);
    }

    #[test]
    fn test_collect_images_keeps_argument_order() {
        let temp_dir = tempfile::tempdir().unwrap();
        let folder = temp_dir.path().join("fridge");
        fs::create_dir(&folder).unwrap();
        File::create(folder.join("b.jpg")).unwrap();
        File::create(folder.join("a.jpg")).unwrap();
        let single = temp_dir.path().join("z.jpeg");
        File::create(&single).unwrap();

        let result = collect_images(&[single.clone(), folder]).unwrap();
        let names: Vec<_> = result.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["z.jpeg", "a.jpg", "b.jpg"]);
    }

    #[test]
    fn test_collect_images_missing_path() {
        let result = collect_images(&[PathBuf::from("/nonexistent/egg.jpg")]);
        assert!(result.is_err());
    }
}
