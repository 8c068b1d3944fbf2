/// Cache collaborator errors. The gate absorbs all of these into
/// pass-through behavior; they never fail a request.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    #[error("cache read failed: {reason}")]
    ReadFailed { reason: String },

    #[error("cache write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("cache entry could not be decoded: {reason}")]
    DecodeFailed { reason: String },
}
