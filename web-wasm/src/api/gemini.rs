//! Gemini API連携（fetch）
//!
//! ワイヤーフォーマットは共通ライブラリの `gemini` モジュールを使い、
//! ここではブラウザの fetch で送受信だけを行う。

use pantry_pal_common::gemini::{endpoint, error_message, GeminiRequest, GeminiResponse};
use pantry_pal_common::{Error, GenerationClient, GenerationRequest, Result, DEFAULT_MODEL};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// ビルド時に埋め込まれたAPIキー（任意）
pub fn build_time_api_key() -> Option<&'static str> {
    option_env!("GEMINI_API_KEY").filter(|key| !key.trim().is_empty())
}

/// fetch を使う Gemini クライアント（タイムアウトなし）
#[derive(Debug, Clone)]
pub struct FetchClient {
    api_key: String,
    model: String,
}

impl FetchClient {
    /// APIキーが空なら Configuration エラー
    pub fn new(api_key: Option<String>, model: &str) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("API_KEY environment variable not set".to_string()))?;
        let model = match model.trim() {
            "" => DEFAULT_MODEL,
            m => m,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}?key={}", endpoint(&self.model), self.api_key)
    }
}

fn js_error(value: JsValue) -> Error {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| "Network request failed".to_string());
    Error::Transport(message)
}

async fn post_json(url: &str, body: &str) -> std::result::Result<Response, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    resp_value.dyn_into()
}

impl GenerationClient for FetchClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = serde_json::to_string(&GeminiRequest::new(request, None))?;
        let resp = post_json(&self.url(), &body).await.map_err(js_error)?;

        if !resp.ok() {
            let text = match resp.text() {
                Ok(promise) => JsFuture::from(promise)
                    .await
                    .ok()
                    .and_then(|v| v.as_string())
                    .unwrap_or_default(),
                Err(_) => String::new(),
            };
            return Err(Error::Transport(error_message(resp.status(), &text)));
        }

        let json = JsFuture::from(resp.json().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let response: GeminiResponse = serde_wasm_bindgen::from_value(json)
            .map_err(|e| Error::Transport(e.to_string()))?;
        response.into_text()
    }
}
