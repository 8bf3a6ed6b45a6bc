//! 生成クライアント
//!
//! モデル呼び出しの抽象化。トランスポートは実装ごと（CLI: reqwest, Web: fetch, テスト: スクリプト）、
//! パースは共通の [`invoke`] で行う。

use crate::error::{Error, Result};
use crate::parser::{parse_feast_menu, parse_feast_plan, parse_recipes};
use crate::staging::ImagePayload;
use crate::types::Generated;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;

/// 既定モデル
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// 呼び出しの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    RecipeGeneration,
    FeastMenuConcept,
    FeastDetailedPlan,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CallKind::RecipeGeneration => "recipe generation",
            CallKind::FeastMenuConcept => "feast menu",
            CallKind::FeastDetailedPlan => "feast plan",
        };
        f.write_str(label)
    }
}

/// Base64エンコード済み画像
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

impl InlineImage {
    pub fn from_payload(payload: &ImagePayload) -> Self {
        Self {
            mime_type: payload.mime_type.clone(),
            data: STANDARD.encode(&payload.bytes),
        }
    }
}

/// 1回分の生成リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub kind: CallKind,
    pub prompt: String,
    pub schema: serde_json::Value,
    /// テキストより前に送る画像（ステージング順）
    pub images: Vec<InlineImage>,
}

impl GenerationRequest {
    /// 画像データの合計サイズ（Base64後）
    pub fn image_bytes(&self) -> usize {
        self.images.iter().map(|img| img.data.len()).sum()
    }
}

/// トランスポート層
///
/// 成功時はモデルが返したテキスト（JSON文字列のはず）をそのまま返す
#[allow(async_fn_in_trait)]
pub trait GenerationClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// 呼び出し種別に応じてテキストをパース
pub fn parse_generated(kind: CallKind, text: &str) -> Result<Generated> {
    match kind {
        CallKind::RecipeGeneration => parse_recipes(text).map(Generated::Recipes),
        CallKind::FeastMenuConcept => parse_feast_menu(text).map(Generated::Menu),
        CallKind::FeastDetailedPlan => parse_feast_plan(text).map(Generated::Plan),
    }
}

/// 送信してパースまで行う（リトライなし）
pub async fn invoke<C: GenerationClient + ?Sized>(
    client: &C,
    request: &GenerationRequest,
) -> Result<Generated> {
    tracing::debug!(
        kind = %request.kind,
        images = request.images.len(),
        image_bytes = request.image_bytes(),
        prompt_chars = request.prompt.len(),
        "sending generation request"
    );
    let text = client.generate(request).await?;
    parse_generated(request.kind, &text)
}

// =============================================
// ScriptedClient
// =============================================

/// 応答を事前に登録しておくクライアント（テスト・デモ用）
///
/// 登録順に1件ずつ返す。尽きたらTransportエラー
#[derive(Debug, Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 成功応答を追加
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Ok(text.into()));
        self
    }

    /// 失敗応答を追加
    pub fn with_error(self, error: Error) -> Self {
        self.push(Err(error));
        self
    }

    pub fn push(&self, response: Result<String>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// 受け取ったリクエスト数
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// 受け取ったリクエストの写し
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl GenerationClient for ScriptedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::Transport(format!(
                    "No scripted response for {} request",
                    request.kind
                )))
            })
    }
}
