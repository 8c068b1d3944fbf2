//! Error taxonomy for the translation gateway.
//!
//! Each subsystem has its own error enum; `PalisadeError` is the umbrella
//! every public entry point returns. Only compliance violations and
//! provider exhaustion are terminal — retrieval and cache failures are
//! absorbed by their stages and never reach the caller.

mod cache_error;
mod compliance_error;
mod provider_error;
mod retrieval_error;

pub use cache_error::CacheError;
pub use compliance_error::ComplianceError;
pub use provider_error::ProviderError;
pub use retrieval_error::RetrievalError;

/// Umbrella error for all Palisade operations.
#[derive(Debug, thiserror::Error)]
pub enum PalisadeError {
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("request out of domain: {reason}")]
    RelevanceRejection { reason: String },
}

/// Convenience alias used across the workspace.
pub type PalisadeResult<T> = Result<T, PalisadeError>;
