//! Ordered provider fallback chain with bounded backoff.

use std::time::Duration;

use palisade_core::errors::ProviderError;
use palisade_core::models::ChatMessage;
use palisade_core::traits::ICompletionProvider;
use tracing::{debug, warn};

/// Retry policy for transient network failures on one provider.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries per provider before advancing to the next one.
    pub max_retries: u32,
    /// Initial backoff duration (doubles each retry).
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// A successful completion with its provenance.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// Ordered list of completion providers with typed early-exit.
///
/// Providers are tried in configured order; a request may name a
/// preferred provider, which is then tried first.
pub struct ProviderChain {
    providers: Vec<Box<dyn ICompletionProvider>>,
    retry: RetryConfig,
}

impl ProviderChain {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            providers: Vec::new(),
            retry,
        }
    }

    /// Add a provider to the end of the chain.
    pub fn push(&mut self, provider: Box<dyn ICompletionProvider>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of all configured providers, preferred-first ordering not
    /// applied.
    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    /// Whether any provider in the chain believes it is reachable.
    pub fn any_available(&self) -> bool {
        self.providers.iter().any(|p| p.is_available())
    }

    /// Run one completion through the chain.
    ///
    /// `preferred` promotes a named provider to the front; `model`
    /// overrides the chosen provider's default.
    pub fn complete(
        &self,
        messages: &[ChatMessage],
        preferred: Option<&str>,
        model: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        let mut attempted = Vec::new();
        let mut last_error = "no providers configured".to_string();

        for provider in self.ordered(preferred) {
            if !provider.is_available() {
                debug!(provider = provider.name(), "skipping unavailable provider");
                continue;
            }
            attempted.push(provider.name().to_string());

            let mut backoff = self.retry.initial_backoff;
            let mut attempt = 0u32;
            loop {
                match provider.complete(messages, model) {
                    Ok(text) => {
                        return Ok(Completion {
                            text,
                            provider: provider.name().to_string(),
                            model: model.unwrap_or(provider.default_model()).to_string(),
                        });
                    }
                    Err(e) if e.is_retryable() && attempt < self.retry.max_retries => {
                        attempt += 1;
                        warn!(
                            provider = provider.name(),
                            attempt,
                            error = %e,
                            "transient failure, retrying after backoff"
                        );
                        std::thread::sleep(backoff);
                        backoff = (backoff * 2).min(self.retry.max_backoff);
                    }
                    Err(e) => {
                        warn!(
                            provider = provider.name(),
                            error = %e,
                            "provider failed, advancing in chain"
                        );
                        last_error = e.to_string();
                        break;
                    }
                }
            }
        }

        Err(ProviderError::AllProvidersExhausted {
            attempted,
            last_error,
        })
    }

    /// Iteration order: the preferred provider first when it exists,
    /// then the rest in configured order.
    fn ordered(&self, preferred: Option<&str>) -> Vec<&dyn ICompletionProvider> {
        let mut out: Vec<&dyn ICompletionProvider> = Vec::with_capacity(self.providers.len());
        if let Some(name) = preferred {
            if let Some(p) = self.providers.iter().find(|p| p.name() == name) {
                out.push(p.as_ref());
            }
        }
        for p in &self.providers {
            if preferred != Some(p.name()) {
                out.push(p.as_ref());
            }
        }
        out
    }
}
