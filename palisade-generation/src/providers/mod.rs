//! HTTP completion providers.
//!
//! Each provider owns a blocking client with an explicit timeout and
//! maps HTTP failures onto the classified `ProviderError` taxonomy so
//! the chain can decide between retrying and advancing.

mod anthropic;
mod openai;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use openai::{OpenAiConfig, OpenAiProvider};

use palisade_core::errors::ProviderError;

/// Map an HTTP status onto the error taxonomy.
fn classify_status(provider: &str, status: reqwest::StatusCode, body: String) -> ProviderError {
    let reason = format!("HTTP {status}: {body}");
    let provider = provider.to_string();
    match status.as_u16() {
        401 | 403 => ProviderError::Auth { provider, reason },
        429 => ProviderError::Quota { provider, reason },
        s if s >= 500 => ProviderError::Network { provider, reason },
        _ => ProviderError::InvalidResponse { provider, reason },
    }
}

/// Map a transport-level failure onto the error taxonomy.
fn transport_error(provider: &str, e: reqwest::Error) -> ProviderError {
    ProviderError::Network {
        provider: provider.to_string(),
        reason: e.to_string(),
    }
}
