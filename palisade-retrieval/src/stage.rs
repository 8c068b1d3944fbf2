//! Similarity search over the index collaborator, absorbing failures.

use palisade_core::models::CandidateMatch;
use palisade_core::traits::IVectorIndex;
use tracing::{debug, warn};

/// What retrieval produced for one request.
#[derive(Debug, Default)]
pub struct RetrievalOutcome {
    /// Candidates ordered by descending score.
    pub candidates: Vec<CandidateMatch>,
    /// True when the index was unreachable and retrieval degraded to
    /// an empty result.
    pub degraded: bool,
}

/// Wraps the vector index with the exact-match threshold decision.
pub struct RetrievalStage<'a> {
    index: &'a dyn IVectorIndex,
    top_k: usize,
    exact_match_threshold: f64,
}

impl<'a> RetrievalStage<'a> {
    pub fn new(index: &'a dyn IVectorIndex, top_k: usize, exact_match_threshold: f64) -> Self {
        Self {
            index,
            top_k,
            exact_match_threshold,
        }
    }

    /// Search for similar historical queries. An index failure degrades
    /// to an empty outcome; the pipeline then generates with no examples.
    pub fn retrieve(&self, text: &str) -> RetrievalOutcome {
        match self.index.search(text, self.top_k) {
            Ok(mut candidates) => {
                // Defensive re-sort: the contract says descending, but
                // the threshold decision depends on it.
                candidates.sort_by(|a, b| {
                    b.score
                        .partial_cmp(&a.score)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                candidates.truncate(self.top_k);
                debug!(count = candidates.len(), "similarity search complete");
                RetrievalOutcome {
                    candidates,
                    degraded: false,
                }
            }
            Err(e) => {
                warn!(index = self.index.name(), error = %e, "retrieval degraded to generation-only");
                RetrievalOutcome {
                    candidates: Vec::new(),
                    degraded: true,
                }
            }
        }
    }

    /// The exact-match decision: the top candidate is authoritative iff
    /// its score is at or above the threshold. The boundary is inclusive.
    pub fn exact_match<'c>(&self, outcome: &'c RetrievalOutcome) -> Option<&'c CandidateMatch> {
        outcome
            .candidates
            .first()
            .filter(|c| c.score >= self.exact_match_threshold)
    }

    /// Write a validated pair back to the index. Failures are absorbed;
    /// losing a future retrieval hit never fails the current request.
    pub fn store(&self, text: &str, sql: &str) {
        if let Err(e) = self.index.upsert(text, sql) {
            warn!(index = self.index.name(), error = %e, "index write-back failed");
        }
    }
}
