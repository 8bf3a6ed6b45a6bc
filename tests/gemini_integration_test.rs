//! 実APIを叩く結合テスト（GEMINI_API_KEY 未設定ならスキップ）

use pantry_pal::gemini::GeminiClient;
use pantry_pal_common::prompts::feast_menu_request;
use pantry_pal_common::{invoke, FeastField, FeastForm, Generated, DEFAULT_MODEL};

#[tokio::test]
async fn gemini_feast_menu_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let client = GeminiClient::new(Some(api_key), DEFAULT_MODEL, 120, Some(0.2))
        .expect("client build failed");

    let form = FeastForm::default()
        .set_field(FeastField::Theme("Picnic in the park".to_string()))
        .set_field(FeastField::Guests(6));
    let request = feast_menu_request(&form);

    let generated = invoke(&client, &request).await.expect("gemini call failed");
    let Generated::Menu(menu) = generated else {
        panic!("expected a feast menu");
    };
    assert!(!menu.menu_title.is_empty());
    assert!(!menu.main_course.name.is_empty());
}

#[tokio::test]
async fn gemini_invalid_key_is_transport_error() {
    if std::env::var("GEMINI_API_KEY").map(|k| k.trim().is_empty()).unwrap_or(true) {
        eprintln!("GEMINI_API_KEY not set; skipping integration test");
        return;
    }

    let client = GeminiClient::new(Some("invalid-key".to_string()), DEFAULT_MODEL, 30, None)
        .expect("client build failed");
    let form = FeastForm::default().set_field(FeastField::Theme("Brunch".to_string()));

    let err = invoke(&client, &feast_menu_request(&form))
        .await
        .expect_err("invalid key should fail");
    assert!(err.is_generation_failure());
}
