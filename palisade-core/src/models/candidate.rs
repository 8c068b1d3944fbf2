use serde::{Deserialize, Serialize};

/// One scored historical match from the vector index. Read-only
/// downstream of retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Similarity score in [0, 1].
    pub score: f64,
    /// Opaque identifier assigned by the index.
    pub id: String,
    /// The natural-language text the candidate was stored under.
    pub text: String,
    /// The SQL associated with that text.
    pub sql: String,
}
