use crate::errors::RetrievalError;
use crate::models::CandidateMatch;

/// Embedding + similarity-index collaborator.
///
/// Embedding computation happens behind this boundary; the pipeline only
/// ever sees scored candidates.
pub trait IVectorIndex: Send + Sync {
    /// Search for the `k` most similar historical queries.
    /// Results are ordered by descending score, each score in [0, 1].
    fn search(&self, text: &str, k: usize) -> Result<Vec<CandidateMatch>, RetrievalError>;

    /// Store a validated natural-language/SQL pair for future retrieval.
    fn upsert(&self, text: &str, sql: &str) -> Result<(), RetrievalError>;

    /// Whether the index is currently reachable.
    fn is_available(&self) -> bool;

    /// Human-readable collaborator name.
    fn name(&self) -> &str;
}
