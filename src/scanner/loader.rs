//! 画像読み込み
//!
//! ファイルを読み、中身からMIMEタイプを判定し、必要なら長辺を縮小してJPEGに変換する。

use super::ImageInfo;
use crate::error::{PantryError, Result};
use image::{imageops::FilterType, DynamicImage, ImageFormat};
use pantry_pal_common::ImagePayload;
use rayon::prelude::*;
use std::io::Cursor;

fn load_error(info: &ImageInfo, reason: impl ToString) -> PantryError {
    PantryError::ImageLoad {
        path: info.path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// 1枚読み込む。`max_size` が0なら縮小しない
pub fn load_payload(info: &ImageInfo, max_size: u32) -> Result<ImagePayload> {
    let bytes = std::fs::read(&info.path)?;
    let format = image::guess_format(&bytes).map_err(|e| load_error(info, e))?;

    if max_size == 0 {
        return Ok(ImagePayload::new(&info.file_name, format.to_mime_type(), bytes));
    }

    let decoded = image::load_from_memory_with_format(&bytes, format).map_err(|e| load_error(info, e))?;
    if decoded.width().max(decoded.height()) <= max_size {
        return Ok(ImagePayload::new(&info.file_name, format.to_mime_type(), bytes));
    }

    let resized = decoded.resize(max_size, max_size, FilterType::Triangle);
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut encoded = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut encoded), ImageFormat::Jpeg)
        .map_err(|e| load_error(info, e))?;

    tracing::debug!(
        file = %info.file_name,
        original = bytes.len(),
        resized = encoded.len(),
        "downscaled image"
    );
    Ok(ImagePayload::new(&info.file_name, ImageFormat::Jpeg.to_mime_type(), encoded))
}

/// 並列に読み込む（結果は入力順）
pub fn load_images(images: &[ImageInfo], max_size: u32) -> Result<Vec<ImagePayload>> {
    images
        .par_iter()
        .map(|info| load_payload(info, max_size))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::path::Path;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> ImageInfo {
        let path = dir.join(name);
        RgbImage::from_pixel(width, height, Rgb([200, 30, 30]))
            .save(&path)
            .unwrap();
        ImageInfo {
            path,
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_small_image_kept_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let info = write_png(dir.path(), "berry.png", 8, 4);

        let payload = load_payload(&info, 64).unwrap();
        assert_eq!(payload.mime_type, "image/png");
        assert_eq!(&*payload.bytes, std::fs::read(&info.path).unwrap().as_slice());
    }

    #[test]
    fn test_large_image_downscaled_to_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let info = write_png(dir.path(), "melon.png", 40, 20);

        let payload = load_payload(&info, 10).unwrap();
        assert_eq!(payload.mime_type, "image/jpeg");
        let decoded = image::load_from_memory(&payload.bytes).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 5);
    }

    #[test]
    fn test_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let info = ImageInfo {
            path,
            file_name: "fake.jpg".to_string(),
        };

        assert!(matches!(load_payload(&info, 0), Err(PantryError::ImageLoad { .. })));
    }

    #[test]
    fn test_load_images_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let infos: Vec<_> = (0..6)
            .map(|i| write_png(dir.path(), &format!("img{}.png", i), 2 + i, 2))
            .collect();

        let payloads = load_images(&infos, 0).unwrap();
        let names: Vec<_> = payloads.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["img0.png", "img1.png", "img2.png", "img3.png", "img4.png", "img5.png"]);
    }
}
