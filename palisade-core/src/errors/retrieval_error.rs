/// Vector-index subsystem errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    #[error("similarity search failed: {reason}")]
    SearchFailed { reason: String },

    #[error("index write failed: {reason}")]
    UpsertFailed { reason: String },

    #[error("index unavailable: {reason}")]
    Unavailable { reason: String },
}
