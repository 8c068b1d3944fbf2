use crate::errors::ProviderError;
use crate::models::ChatMessage;

/// Completion-provider collaborator.
pub trait ICompletionProvider: Send + Sync {
    /// Generate a completion for the given conversation.
    /// `model` overrides the provider default when set.
    fn complete(&self, messages: &[ChatMessage], model: Option<&str>)
        -> Result<String, ProviderError>;

    /// Provider name as referenced in requests (e.g. "openai").
    fn name(&self) -> &str;

    /// Model used when the request does not specify one.
    fn default_model(&self) -> &str;

    /// Whether the provider is configured and believed reachable.
    fn is_available(&self) -> bool;
}
