use serde::{Deserialize, Serialize};

/// One natural-language translation request. Immutable once accepted;
/// owns nothing beyond its own fields and is discarded after the
/// response is produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// The natural-language question (1–1000 chars after trimming).
    pub text: String,
    /// Requested completion provider, tried first when set.
    pub provider: Option<String>,
    /// Requested model, overriding the provider default.
    pub model: Option<String>,
    /// When false, the cache lookup is bypassed. Stores still happen.
    pub use_cache: bool,
    /// Whether to generate a natural-language explanation of the SQL.
    pub explain: bool,
    /// Whether to echo the similar queries consulted during retrieval.
    pub include_similar: bool,
    /// Whether the validated pair is written back to the vector index.
    pub store_result: bool,
    /// Identifier/version of the schema the SQL targets. Part of the
    /// cache key so schema changes never serve stale SQL.
    pub schema_id: String,
}

impl TranslationRequest {
    /// Create a request with default flags: cache on, explanation on,
    /// no echo, no index write-back.
    pub fn new(text: impl Into<String>, schema_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            provider: None,
            model: None,
            use_cache: true,
            explain: true,
            include_similar: false,
            store_result: false,
            schema_id: schema_id.into(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    pub fn without_explanation(mut self) -> Self {
        self.explain = false;
        self
    }
}
