//! エラー型定義
//!
//! ウィザード・生成呼び出しで発生するエラーの分類:
//! - Validation: 送信前の入力チェック（テーマ未入力など）
//! - Transport: モデル呼び出し自体が完了しなかった
//! - Format: 呼び出しは成功したがJSONとして解釈できなかった
//! - Configuration: クライアント生成時の設定不足（APIキー未設定など）

use thiserror::Error;

/// Formatエラー時にユーザーへ表示する文言
pub const FORMAT_ERROR_MESSAGE: &str =
    "The AI returned an unexpected response format. Please try again.";

/// 共通エラー型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    /// 下層のメッセージをそのまま表示する
    #[error("{0}")]
    Transport(String),

    #[error("{}", FORMAT_ERROR_MESSAGE)]
    Format {
        /// パース失敗の詳細（ログ用）
        detail: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("A generation request is already in progress")]
    InFlight,

    #[error("Invalid transition: {0}")]
    InvalidTransition(&'static str),

    #[error("JSON error: {0}")]
    Json(String),
}

impl Error {
    /// Formatエラーを生成
    pub fn format(detail: impl Into<String>) -> Self {
        Error::Format {
            detail: detail.into(),
        }
    }

    /// リモート呼び出しに起因するエラーか
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, Error::Transport(_) | Error::Format { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
