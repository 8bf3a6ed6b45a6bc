//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use pantry_pal::error::PantryError;
use pantry_pal::scanner;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(result.is_err());

    let err = result.unwrap_err();
    assert!(matches!(err, PantryError::FileNotFound(_)));
}

/// 空のフォルダをスキャンした場合
#[test]
fn test_scan_empty_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = scanner::scan_folder(dir.path());

    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 画像のないフォルダをスキャンした場合
#[test]
fn test_scan_folder_no_images() {
    let dir = tempdir().expect("Failed to create temp dir");

    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    let result = scanner::scan_folder(dir.path());
    assert!(result.is_ok());
    assert!(result.unwrap().is_empty());
}

/// 存在しないファイルを指定した場合
#[test]
fn test_collect_missing_file() {
    let result = scanner::collect_images(&[Path::new("/nonexistent/carrot.jpg").to_path_buf()]);
    assert!(matches!(result, Err(PantryError::FileNotFound(_))));
}

/// PantryErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PantryError::Config("bad config".to_string()),
        PantryError::FileNotFound("carrot.jpg".to_string()),
        PantryError::ImageLoad {
            path: "carrot.jpg".to_string(),
            reason: "unsupported".to_string(),
        },
        PantryError::NoImagesFound("fridge/".to_string()),
        PantryError::Prompt("interrupted".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// MissingApiKeyエラーのメッセージ確認
#[test]
fn test_missing_api_key_message() {
    let display = PantryError::MissingApiKey.to_string();

    assert!(display.contains("GEMINI_API_KEY"));
    assert!(display.contains("pantry-pal config"));
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PantryError = io_err.into();

    assert!(matches!(err, PantryError::Io(_)));
    assert!(err.to_string().contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PantryError = json_err.into();

    assert!(matches!(err, PantryError::JsonParse(_)));
}

/// 共通エラーは透過的に表示される
#[test]
fn test_common_error_transparent() {
    let common_err =
        pantry_pal_common::Error::Transport("API key not valid. Please pass a valid API key.".to_string());
    let err: PantryError = common_err.into();

    assert!(matches!(err, PantryError::Common(_)));
    assert_eq!(err.to_string(), "API key not valid. Please pass a valid API key.");
}

/// Formatエラーは詳細を隠して定型文を表示する
#[test]
fn test_format_error_hides_detail() {
    let err: PantryError = pantry_pal_common::Error::format("expected `,` at line 3").into();
    assert_eq!(err.to_string(), pantry_pal_common::FORMAT_ERROR_MESSAGE);
}
