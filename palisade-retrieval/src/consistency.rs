//! Temporal consistency between a retrieved candidate and the request.
//!
//! A high similarity score says the questions are alike, not that they
//! ask about the same period. Coarse year tokens catch the common case
//! where "headcount in 2021" would otherwise answer "headcount in 2024".

use std::collections::BTreeSet;
use std::sync::LazyLock;

use palisade_core::models::{CandidateMatch, ConsistencyVerdict};
use regex::Regex;
use tracing::debug;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").expect("year pattern is valid"));

/// Compares a retrieved candidate against the current request text.
pub struct ConsistencyChecker;

impl ConsistencyChecker {
    /// Permissive by design: absent year tokens on either side mean
    /// there is no evidence of a mismatch, and a false negative only
    /// costs a regeneration, never a security violation.
    pub fn check(candidate: &CandidateMatch, request_text: &str) -> ConsistencyVerdict {
        let request_years = extract_years(request_text);
        let candidate_years = extract_years(&candidate.text);

        if request_years.is_empty() || candidate_years.is_empty() {
            return ConsistencyVerdict::Consistent;
        }

        if request_years.is_disjoint(&candidate_years) {
            debug!(
                ?request_years,
                ?candidate_years,
                candidate_id = %candidate.id,
                "temporal mismatch, forcing generation path"
            );
            return ConsistencyVerdict::Inconsistent {
                reason: "temporal mismatch".to_string(),
            };
        }

        ConsistencyVerdict::Consistent
    }
}

fn extract_years(text: &str) -> BTreeSet<String> {
    YEAR.find_iter(text).map(|m| m.as_str().to_string()).collect()
}
