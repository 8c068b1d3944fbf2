//! # palisade-cache
//!
//! The cache gate between the pipeline and the key-value collaborator.
//!
//! Keys are a pure function of normalized request content — never of
//! caller identity. The per-request bypass flag disables lookups only;
//! stores always run, so a bypassing caller still refreshes the entry
//! for everyone else. Collaborator failures degrade the gate to a
//! pass-through and never fail a request.

pub mod gate;
pub mod key;
pub mod memory_store;

pub use gate::CacheGate;
pub use key::derive_key;
pub use memory_store::MemoryCacheStore;
