//! Gemini API ワイヤーフォーマット
//!
//! `generateContent` のリクエスト・レスポンス構造体。トランスポート（reqwest / fetch）は
//! 各クレート側で持ち、ここではJSONの組み立てと取り出しだけを行う。

use crate::client::{GenerationRequest, InlineImage};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// APIエンドポイントのベースURL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// モデル名から `generateContent` のURLを作る
pub fn endpoint(model: &str) -> String {
    format!("{}/{}:generateContent", GEMINI_API_BASE, model)
}

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineImage,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    response_mime_type: String,
    response_schema: serde_json::Value,
}

impl GeminiRequest {
    /// 画像 → テキストの順でパーツを並べる
    pub fn new(request: &GenerationRequest, temperature: Option<f32>) -> Self {
        let mut parts: Vec<Part> = request
            .images
            .iter()
            .cloned()
            .map(|inline_data| Part::InlineData { inline_data })
            .collect();
        parts.push(Part::Text {
            text: request.prompt.clone(),
        });

        Self {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature,
                response_mime_type: "application/json".to_string(),
                response_schema: request.schema.clone(),
            },
        }
    }
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

impl GeminiResponse {
    /// 最初の候補のテキスト（空ならTransportエラー）
    pub fn into_text(self) -> Result<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(Error::Transport("The model returned an empty response.".to_string()));
        }
        Ok(text.trim().to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// 非2xxレスポンスからメッセージを取り出す
///
/// `{"error": {"message": ...}}` ならそのメッセージ、それ以外はステータス付きの本文
pub fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => format!("API error: {}", status),
        Err(_) => format!("API error: {} {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::CallKind;
    use serde_json::json;

    fn request() -> GenerationRequest {
        GenerationRequest {
            kind: CallKind::RecipeGeneration,
            prompt: "make dinner".to_string(),
            schema: json!({"type": "ARRAY"}),
            images: vec![
                InlineImage {
                    mime_type: "image/png".to_string(),
                    data: "AAA=".to_string(),
                },
                InlineImage {
                    mime_type: "image/jpeg".to_string(),
                    data: "BBB=".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_images_before_text() {
        let body = serde_json::to_value(GeminiRequest::new(&request(), None)).expect("シリアライズ失敗");

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "BBB=");
        assert_eq!(parts[2]["text"], "make dinner");
    }

    #[test]
    fn test_request_generation_config() {
        let body = serde_json::to_value(GeminiRequest::new(&request(), Some(0.4))).expect("シリアライズ失敗");

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"], json!({"type": "ARRAY"}));
        assert!((config["temperature"].as_f64().unwrap() - 0.4).abs() < 1e-6);

        let body = serde_json::to_value(GeminiRequest::new(&request(), None)).unwrap();
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_response_text() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": " [1, "}, {"text": "2] "}]}}]
        }))
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "[1, 2]");
    }

    #[test]
    fn test_response_without_candidates() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(response.into_text(), Err(Error::Transport(_))));
    }

    #[test]
    fn test_error_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(error_message(400, body), "API key not valid. Please pass a valid API key.");
        assert_eq!(error_message(503, ""), "API error: 503");
        assert_eq!(error_message(502, "Bad Gateway"), "API error: 502 Bad Gateway");
    }
}
