//! # palisade-compliance
//!
//! Deterministic access-isolation analysis and repair for SQL text from
//! untrusted generative sources.
//!
//! ## Rule set
//! 1. **Read-only** — every statement starts with SELECT or WITH;
//!    statement stacking with write verbs is the primary injection vector.
//! 2. **Anchor table** — the tenant-anchor table appears with an alias.
//! 3. **Tenant filter** — `<anchor_alias>.<user_id_column> = <placeholder>`
//!    bound to a discovered anchor alias, not merely shape-alike.
//! 4. **Markers** — trailing `#NAME#` annotations naming the anchor alias.
//!
//! A lightweight tokenizer distinguishes string/comment literals from
//! structural SQL before any rule is evaluated, so quoted text can never
//! satisfy or violate a rule.

pub mod analyzer;
pub mod corrector;
pub mod lexer;
pub mod syntax;

pub use analyzer::ComplianceAnalyzer;
pub use corrector::ComplianceCorrector;
