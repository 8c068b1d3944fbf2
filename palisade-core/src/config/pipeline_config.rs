use serde::{Deserialize, Serialize};

use crate::constants;

/// Pipeline tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Similarity score at or above which the top candidate is
    /// authoritative. The boundary is inclusive.
    pub exact_match_threshold: f64,
    /// Candidates requested from the vector index per search.
    pub top_k: usize,
    /// Retrieved candidates passed to generation as in-context examples.
    pub max_examples: usize,
    /// Whether validated responses are written to the cache at all.
    pub cache_enabled: bool,
    /// Cache entry time-to-live in seconds.
    pub cache_ttl_secs: u64,
    /// Whether the LLM relevance pre-check runs before generation.
    pub relevance_check: bool,
    /// Business domain the governed schema covers, used by the
    /// relevance pre-check prompt.
    pub domain: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            exact_match_threshold: constants::DEFAULT_EXACT_MATCH_THRESHOLD,
            top_k: constants::DEFAULT_TOP_K,
            max_examples: constants::DEFAULT_MAX_EXAMPLES,
            cache_enabled: true,
            cache_ttl_secs: constants::DEFAULT_CACHE_TTL_SECS,
            relevance_check: true,
            domain: "human resources".to_string(),
        }
    }
}
