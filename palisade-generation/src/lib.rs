//! # palisade-generation
//!
//! Fresh SQL generation against an ordered list of completion providers.
//!
//! ## Fallback policy
//! - auth/quota failure → advance to the next configured provider
//! - transient network failure → bounded exponential backoff on the
//!   same provider, then advance
//! - all providers exhausted → terminal `AllProvidersExhausted`
//!
//! Also hosts the relevance pre-check and explanation generation, both
//! of which degrade permissively on provider failure.

pub mod chain;
pub mod prompts;
pub mod providers;
pub mod stage;

pub use chain::{Completion, ProviderChain, RetryConfig};
pub use stage::{GeneratedSql, GenerationStage};
