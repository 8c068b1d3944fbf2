use serde::{Deserialize, Serialize};

use super::validation_result::ValidationResult;

/// Where the returned SQL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlSource {
    /// Served from the response cache.
    Cache,
    /// An authoritative retrieved candidate, validated this run.
    ExactMatch,
    /// Freshly generated, validated this run.
    Generated,
}

/// Echo of one similar query consulted during retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarQuery {
    pub score: f64,
    pub text: String,
    pub sql: String,
}

/// The response envelope returned to the transport layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// The validated SQL. Always satisfies the compliance invariant.
    pub sql: String,
    pub validation: ValidationResult,
    pub explanation: Option<String>,
    pub source: SqlSource,
    /// Provider and model that produced the SQL, when generated.
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Similar queries consulted, when the request asked for the echo.
    pub similar_queries: Option<Vec<SimilarQuery>>,
    /// Wall-clock processing time for this call.
    pub processing_ms: u64,
}
