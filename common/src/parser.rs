//! APIレスポンスパーサー
//!
//! モデルの応答テキストからJSONを抽出し、レシピ・メニュー・プランにパースする。
//! パースできない場合は生テキストをwarnログに残して Format エラーを返す。

use crate::error::{Error, Result};
use crate::types::{FeastMenu, FeastPlan, Recipe};
use serde::de::DeserializeOwned;

/// 応答からJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 先頭の括弧（`[` か `{` の早い方）から対応する閉じ括弧の最後の出現まで
/// 3. エラー
///
/// # Examples
/// ```
/// use pantry_pal_common::extract_json;
///
/// let response = "Here you go: {\"menuTitle\": \"Feast\"}";
/// let json = extract_json(response).unwrap();
/// assert_eq!(json, "{\"menuTitle\": \"Feast\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    let open = match (response.find('['), response.find('{')) {
        (Some(a), Some(o)) => Some(a.min(o)),
        (a, o) => a.or(o),
    };
    if let Some(start) = open {
        let close = if response[start..].starts_with('[') { ']' } else { '}' };
        if let Some(end) = response.rfind(close) {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::format("no JSON found in response"))
}

fn parse_as<T: DeserializeOwned>(response: &str, what: &str) -> Result<T> {
    let trimmed = response.trim();
    let parsed = extract_json(trimmed).and_then(|json| {
        serde_json::from_str::<T>(json)
            .map_err(|e| Error::format(format!("{} JSON parse error: {}", what, e)))
    });

    if let Err(Error::Format { detail }) = &parsed {
        tracing::warn!(%detail, raw = %trimmed, "failed to parse model response");
    }
    parsed
}

/// レシピ配列をパース
pub fn parse_recipes(response: &str) -> Result<Vec<Recipe>> {
    parse_as(response, "recipe")
}

/// 宴会メニュー案をパース
pub fn parse_feast_menu(response: &str) -> Result<FeastMenu> {
    parse_as(response, "feast menu")
}

/// 宴会プランをパース
pub fn parse_feast_plan(response: &str) -> Result<FeastPlan> {
    parse_as(response, "feast plan")
}
