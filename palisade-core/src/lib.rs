//! # palisade-core
//!
//! Foundation crate for the Palisade NL→SQL translation gateway.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{FrameworkRules, PalisadeConfig, PipelineConfig};
pub use errors::{PalisadeError, PalisadeResult};
pub use models::{
    CandidateMatch, ComplianceReport, TranslationRequest, TranslationResponse, ValidationResult,
};
