use async_trait::async_trait;

use super::{ReflectionError, TextGenerator};
use crate::config::ReflectionConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Text generation over the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(config: &ReflectionConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ReflectionConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        }
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, ReflectionError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        });

        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ReflectionError::Status { status, body });
        }

        let api_resp: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ReflectionError::Malformed(e.to_string()))?;

        extract_text(&api_resp)
    }
}

/// Concatenate the text blocks of a Messages API response.
pub fn extract_text(api_resp: &serde_json::Value) -> Result<String, ReflectionError> {
    let blocks = api_resp["content"]
        .as_array()
        .ok_or_else(|| ReflectionError::Malformed("no content array".to_string()))?;

    let text: String = blocks
        .iter()
        .filter_map(|block| block["text"].as_str())
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        Err(ReflectionError::Empty)
    } else {
        Ok(text)
    }
}
