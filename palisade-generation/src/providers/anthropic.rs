//! Anthropic messages-API provider.

use std::time::Duration;

use palisade_core::errors::ProviderError;
use palisade_core::models::{ChatMessage, ChatRole};
use palisade_core::traits::ICompletionProvider;
use serde_json::{json, Value};

use super::{classify_status, transport_error};

const PROVIDER_NAME: &str = "anthropic";
const API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 1024,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: reqwest::blocking::Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;
        Ok(Self { config, client })
    }
}

impl ICompletionProvider for AnthropicProvider {
    fn complete(
        &self,
        messages: &[ChatMessage],
        model: Option<&str>,
    ) -> Result<String, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::NotConfigured {
                provider: PROVIDER_NAME.to_string(),
                reason: "missing API key".to_string(),
            });
        }

        // The messages API takes system text separately.
        let system: String = messages
            .iter()
            .filter(|m| m.role == ChatRole::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let conversation: Vec<Value> = messages
            .iter()
            .filter(|m| m.role != ChatRole::System)
            .map(|m| {
                let role = if m.role == ChatRole::Assistant {
                    "assistant"
                } else {
                    "user"
                };
                json!({"role": role, "content": m.content})
            })
            .collect();

        let payload = json!({
            "model": model.unwrap_or(&self.config.model),
            "max_tokens": self.config.max_tokens,
            "system": system,
            "messages": conversation,
        });

        let url = format!("{}/v1/messages", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&payload)
            .send()
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_status(PROVIDER_NAME, status, body));
        }

        let body: Value = response
            .json()
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;
        body["content"][0]["text"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: PROVIDER_NAME.to_string(),
                reason: "no completion content in response".to_string(),
            })
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    fn is_available(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}
