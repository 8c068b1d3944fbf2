//! # palisade-pipeline
//!
//! The orchestrator that sequences cache lookup, relevance checking,
//! similarity retrieval, generation, multi-level validation,
//! auto-correction, and cache gating into one state machine:
//!
//! ```text
//! Received → Cached(hit) | Retrieving → ExactMatchCandidate | Generating
//!          → Validating → {Accepted | Corrected | Rejected} → Responded
//! ```
//!
//! Every SQL string that leaves [`TranslationEngine::translate`] has
//! passed the compliance gate, whatever its source.

pub mod engine;
pub mod health;
pub mod input;
pub mod state;

pub use engine::TranslationEngine;
pub use state::PipelineState;
