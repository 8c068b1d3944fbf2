/// Completion-provider errors, classified so the fallback chain can
/// decide between retrying and advancing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("[{provider}] authentication failed: {reason}")]
    Auth { provider: String, reason: String },

    #[error("[{provider}] quota or rate limit exceeded: {reason}")]
    Quota { provider: String, reason: String },

    #[error("[{provider}] network error: {reason}")]
    Network { provider: String, reason: String },

    #[error("[{provider}] invalid response: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("[{provider}] not configured: {reason}")]
    NotConfigured { provider: String, reason: String },

    #[error("all completion providers exhausted ({attempted:?}), last error: {last_error}")]
    AllProvidersExhausted {
        attempted: Vec<String>,
        last_error: String,
    },
}

impl ProviderError {
    /// Provider name the error originated from, when there is one.
    pub fn provider(&self) -> Option<&str> {
        match self {
            Self::Auth { provider, .. }
            | Self::Quota { provider, .. }
            | Self::Network { provider, .. }
            | Self::InvalidResponse { provider, .. }
            | Self::NotConfigured { provider, .. } => Some(provider),
            Self::AllProvidersExhausted { .. } => None,
        }
    }

    /// Whether the same provider should be retried with backoff.
    /// Only transient network failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}
