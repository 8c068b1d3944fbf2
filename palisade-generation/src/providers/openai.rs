//! OpenAI-style chat-completions provider.

use std::time::Duration;

use palisade_core::errors::ProviderError;
use palisade_core::models::{ChatMessage, ChatRole};
use palisade_core::traits::ICompletionProvider;
use serde_json::{json, Value};

use super::{classify_status, transport_error};

const PROVIDER_NAME: &str = "openai";

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 0.2,
            timeout: Duration::from_secs(30),
        }
    }
}

pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::blocking::Client,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| transport_error(PROVIDER_NAME, e))?;
        Ok(Self { config, client })
    }
}

fn role_str(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

impl ICompletionProvider for OpenAiProvider {
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

        let payload = json!({
            "model": model.unwrap_or(&self.config.model),
            "temperature": self.config.temperature,
            "messages": messages
                .iter()
                .map(|m| json!({"role": role_str(m.role), "content": m.content}))
                .collect::<Vec<_>>(),
        });

        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
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
        body["choices"][0]["message"]["content"]
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
