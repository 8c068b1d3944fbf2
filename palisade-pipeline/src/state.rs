use std::fmt;

/// Pipeline states, logged at each transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Received,
    CacheHit,
    Retrieving,
    ExactMatchCandidate,
    Generating,
    Validating,
    Accepted,
    Corrected,
    Rejected,
    Responded,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Received => "received",
            Self::CacheHit => "cache_hit",
            Self::Retrieving => "retrieving",
            Self::ExactMatchCandidate => "exact_match_candidate",
            Self::Generating => "generating",
            Self::Validating => "validating",
            Self::Accepted => "accepted",
            Self::Corrected => "corrected",
            Self::Rejected => "rejected",
            Self::Responded => "responded",
        };
        f.write_str(name)
    }
}
