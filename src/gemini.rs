//! Gemini API クライアント（reqwest）

use crate::config::Config;
use pantry_pal_common::gemini::{endpoint, error_message, GeminiRequest, GeminiResponse};
use pantry_pal_common::{Error, GenerationClient, GenerationRequest, Result};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: Option<f32>,
}

impl GeminiClient {
    /// APIキーが空なら Configuration エラー
    pub fn new(
        api_key: Option<String>,
        model: &str,
        timeout_seconds: u64,
        temperature: Option<f32>,
    ) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration("API_KEY environment variable not set".to_string()))?;

        let mut builder = reqwest::Client::builder();
        if timeout_seconds > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_seconds));
        }
        let http = builder
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            api_key,
            model: model.to_string(),
            temperature,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.resolve_api_key(),
            &config.model,
            config.timeout_seconds,
            config.temperature,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl GenerationClient for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let body = GeminiRequest::new(request, self.temperature);

        let response = self
            .http
            .post(endpoint(&self.model))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Transport(error_message(status.as_u16(), &text)));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        parsed.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_configuration_error() {
        let result = GeminiClient::new(None, "gemini-2.5-flash", 30, None);
        assert!(matches!(result, Err(Error::Configuration(_))));

        let result = GeminiClient::new(Some("   ".to_string()), "gemini-2.5-flash", 30, None);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_new_with_key() {
        let client = GeminiClient::new(Some("k".to_string()), "gemini-2.5-pro", 0, Some(0.2)).unwrap();
        assert_eq!(client.model(), "gemini-2.5-pro");
    }
}
