//! End-to-end pipeline scenarios over mock collaborators.
//!
//! Every test drives the public `translate` entry point; the compliance
//! invariant is asserted on whatever comes back, whatever the source.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use palisade_cache::MemoryCacheStore;
use palisade_core::config::{FrameworkRules, PipelineConfig};
use palisade_core::errors::{ComplianceError, PalisadeError, ProviderError, RetrievalError};
use palisade_core::models::{
    CandidateMatch, ChatMessage, ConsistencyVerdict, HealthStatus, SqlSource, TranslationRequest,
    ValidationStatus,
};
use palisade_core::traits::{ICompletionProvider, IVectorIndex};
use palisade_generation::{ProviderChain, RetryConfig};
use palisade_pipeline::TranslationEngine;

const SCHEMA: &str = "CREATE TABLE depot (ID, ID_USER, NOM);\n\
                      CREATE TABLE facts (ID_NUMDEPOT, NOM, AGE);";

const COMPLIANT_SQL: &str = "SELECT b.NOM FROM depot a JOIN facts b ON a.ID=b.ID_NUMDEPOT \
                             WHERE a.ID_USER = ?; #DEPOT_a# #FACTS_b#";
const UNFILTERED_SQL: &str = "SELECT b.NOM FROM depot a JOIN facts b ON a.ID=b.ID_NUMDEPOT;";

struct StaticIndex {
    candidates: Vec<CandidateMatch>,
    down: bool,
}

impl StaticIndex {
    fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            down: false,
        }
    }

    fn with(candidates: Vec<CandidateMatch>) -> Self {
        Self {
            candidates,
            down: false,
        }
    }

    fn down() -> Self {
        Self {
            candidates: Vec::new(),
            down: true,
        }
    }
}

impl IVectorIndex for StaticIndex {
    fn search(&self, _text: &str, _k: usize) -> Result<Vec<CandidateMatch>, RetrievalError> {
        if self.down {
            return Err(RetrievalError::Unavailable {
                reason: "connection refused".to_string(),
            });
        }
        Ok(self.candidates.clone())
    }

    fn upsert(&self, _text: &str, _sql: &str) -> Result<(), RetrievalError> {
        if self.down {
            return Err(RetrievalError::UpsertFailed {
                reason: "connection refused".to_string(),
            });
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        !self.down
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Replies with one canned completion and counts invocations.
struct CannedProvider {
    reply: String,
    calls: Arc<AtomicUsize>,
    fail_auth: bool,
}

impl ICompletionProvider for CannedProvider {
    fn complete(
        &self,
        _messages: &[ChatMessage],
        _model: Option<&str>,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_auth {
            return Err(ProviderError::Auth {
                provider: "canned".to_string(),
                reason: "bad key".to_string(),
            });
        }
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "canned"
    }

    fn default_model(&self) -> &str {
        "canned-model"
    }

    fn is_available(&self) -> bool {
        true
    }
}

fn no_backoff() -> RetryConfig {
    RetryConfig {
        max_retries: 0,
        initial_backoff: Duration::ZERO,
        max_backoff: Duration::ZERO,
    }
}

fn chain_replying(reply: &str, calls: &Arc<AtomicUsize>) -> ProviderChain {
    let mut chain = ProviderChain::new(no_backoff());
    chain.push(Box::new(CannedProvider {
        reply: reply.to_string(),
        calls: calls.clone(),
        fail_auth: false,
    }));
    chain
}

/// Relevance pre-check off so a single canned reply drives generation.
fn quiet_config() -> PipelineConfig {
    PipelineConfig {
        relevance_check: false,
        ..PipelineConfig::default()
    }
}

fn request(text: &str) -> TranslationRequest {
    TranslationRequest::new(text, "v1").without_explanation()
}

fn candidate(score: f64, text: &str, sql: &str) -> CandidateMatch {
    CandidateMatch {
        score,
        id: format!("c-{score}"),
        text: text.to_string(),
        sql: sql.to_string(),
    }
}

// ─── Generation path ───

#[test]
fn generated_sql_is_auto_corrected() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(UNFILTERED_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(response.sql, COMPLIANT_SQL);
    assert_eq!(response.validation.status, ValidationStatus::Corrected);
    assert_eq!(response.source, SqlSource::Generated);
    assert_eq!(response.provider.as_deref(), Some("canned"));
    assert!(engine.validate_framework(&response.sql).is_compliant());
}

#[test]
fn compliant_sql_is_accepted_unchanged() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(response.sql, COMPLIANT_SQL);
    assert_eq!(response.validation.status, ValidationStatus::Accepted);
}

#[test]
fn missing_anchor_table_is_terminal() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("SELECT * FROM facts;", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let err = engine.translate(&request("everything in facts")).unwrap_err();
    assert!(matches!(
        err,
        PalisadeError::Compliance(ComplianceError::MissingAnchorTable { .. })
    ));
}

#[test]
fn write_statement_is_terminal() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("DELETE FROM facts WHERE age > 65;", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let err = engine.translate(&request("seniors past retirement")).unwrap_err();
    assert!(matches!(
        err,
        PalisadeError::Compliance(ComplianceError::ReadOnlyViolation { .. })
    ));
}

#[test]
fn write_request_is_rejected_before_any_call() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let err = engine
        .translate(&request("please update every salary"))
        .unwrap_err();
    assert!(matches!(err, PalisadeError::InvalidRequest { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ─── Exact-match path ───

#[test]
fn exact_match_shortcuts_generation() {
    let index = StaticIndex::with(vec![candidate(0.97, "how many deposits", COMPLIANT_SQL)]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("SHOULD NOT RUN", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("count of deposits")).unwrap();
    assert_eq!(response.source, SqlSource::ExactMatch);
    assert_eq!(response.sql, COMPLIANT_SQL);
    assert!(response.provider.is_none());
    assert_eq!(
        response.validation.consistency,
        Some(ConsistencyVerdict::Consistent)
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn retrieved_candidate_is_still_gated_by_compliance() {
    // A historical match missing its filter is repaired before leaving.
    let index = StaticIndex::with(vec![candidate(0.98, "deposit names", UNFILTERED_SQL)]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("SHOULD NOT RUN", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("deposit names")).unwrap();
    assert_eq!(response.source, SqlSource::ExactMatch);
    assert_eq!(response.validation.status, ValidationStatus::Corrected);
    assert_eq!(response.sql, COMPLIANT_SQL);
}

#[test]
fn score_at_threshold_is_authoritative() {
    let index = StaticIndex::with(vec![candidate(0.95, "deposit names", COMPLIANT_SQL)]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("SHOULD NOT RUN", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("deposit names")).unwrap();
    assert_eq!(response.source, SqlSource::ExactMatch);
}

#[test]
fn score_below_threshold_generates() {
    let index = StaticIndex::with(vec![candidate(0.95 - 1e-9, "deposit names", COMPLIANT_SQL)]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("deposit names")).unwrap();
    assert_eq!(response.source, SqlSource::Generated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn temporal_mismatch_forces_generation() {
    // Score 0.96 clears the threshold, but the candidate answers 2021
    // while the request asks about 2024.
    let index = StaticIndex::with(vec![candidate(
        0.96,
        "employee count in 2021",
        COMPLIANT_SQL,
    )]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("employee count in 2024")).unwrap();
    assert_eq!(response.source, SqlSource::Generated);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(matches!(
        response.validation.consistency,
        Some(ConsistencyVerdict::Inconsistent { .. })
    ));
}

// ─── Cache behavior ───

#[test]
fn cache_hit_short_circuits_the_pipeline() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let first = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(first.source, SqlSource::Generated);

    let second = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(second.source, SqlSource::Cache);
    assert_eq!(second.sql, first.sql);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn bypass_skips_lookup_but_still_refreshes_the_entry() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let bypassing = request("names of all deposits").without_cache();
    let first = engine.translate(&bypassing).unwrap();
    assert_eq!(first.source, SqlSource::Generated);

    // The bypassing call still wrote the entry for everyone else.
    let second = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(second.source, SqlSource::Cache);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn rejected_results_are_never_cached() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);

    let bad_calls = Arc::new(AtomicUsize::new(0));
    let bad_engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("DELETE FROM facts WHERE age > 65;", &bad_calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );
    assert!(bad_engine.translate(&request("seniors past retirement")).is_err());

    // Same store, same question: the failure left nothing behind, so
    // the healthy engine must generate.
    let good_calls = Arc::new(AtomicUsize::new(0));
    let good_engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &good_calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );
    let response = good_engine
        .translate(&request("seniors past retirement"))
        .unwrap();
    assert_eq!(response.source, SqlSource::Generated);
    assert_eq!(good_calls.load(Ordering::SeqCst), 1);
}

// ─── Degradation and terminal failures ───

#[test]
fn retrieval_outage_degrades_to_generation() {
    let index = StaticIndex::down();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("names of all deposits")).unwrap();
    assert_eq!(response.source, SqlSource::Generated);
    assert!(engine.validate_framework(&response.sql).is_compliant());
}

#[test]
fn provider_exhaustion_is_terminal() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let mut chain = ProviderChain::new(no_backoff());
    chain.push(Box::new(CannedProvider {
        reply: String::new(),
        calls: calls.clone(),
        fail_auth: true,
    }));
    chain.push(Box::new(CannedProvider {
        reply: String::new(),
        calls: calls.clone(),
        fail_auth: true,
    }));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain,
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let err = engine.translate(&request("names of all deposits")).unwrap_err();
    match err {
        PalisadeError::Provider(ProviderError::AllProvidersExhausted { attempted, .. }) => {
            assert_eq!(attempted.len(), 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn out_of_domain_sentinel_is_rejected() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("IMPOSSIBLE", &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let err = engine
        .translate(&request("what is the weather tomorrow"))
        .unwrap_err();
    assert!(matches!(err, PalisadeError::RelevanceRejection { .. }));
}

#[test]
fn relevance_precheck_rejects_off_domain_questions() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying("NO", &calls),
        SCHEMA,
        PipelineConfig::default(),
        FrameworkRules::default(),
    );

    let err = engine
        .translate(&request("what is the weather tomorrow"))
        .unwrap_err();
    assert!(matches!(err, PalisadeError::RelevanceRejection { .. }));
    // Only the pre-check ran; no generation was attempted.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// ─── Response envelope ───

#[test]
fn similar_queries_are_echoed_when_requested() {
    let index = StaticIndex::with(vec![candidate(0.5, "deposit names", COMPLIANT_SQL)]);
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let mut req = request("names of all deposits");
    req.include_similar = true;
    let response = engine.translate(&req).unwrap();
    let similar = response.similar_queries.expect("echo was requested");
    assert_eq!(similar.len(), 1);
    assert_eq!(similar[0].sql, COMPLIANT_SQL);
}

#[test]
fn explanation_is_attached_when_requested() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    // `new` requests an explanation by default.
    let response = engine
        .translate(&TranslationRequest::new("names of all deposits", "v1"))
        .unwrap();
    assert!(response.explanation.is_some());
    // One call for the SQL, one for the explanation.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn every_returned_response_is_compliant() {
    let replies = [
        UNFILTERED_SQL,
        COMPLIANT_SQL,
        "SELECT a.NOM, COUNT(*) FROM depot a GROUP BY a.NOM",
        "SELECT a.ID FROM depot a ORDER BY a.ID;",
        "SELECT a.NOM FROM depot a WHERE a.NOM = 'x'",
    ];

    for reply in replies {
        let index = StaticIndex::empty();
        let store = MemoryCacheStore::new(100);
        let calls = Arc::new(AtomicUsize::new(0));
        let engine = TranslationEngine::new(
            &index,
            &store,
            chain_replying(reply, &calls),
            SCHEMA,
            quiet_config(),
            FrameworkRules::default(),
        );

        let response = engine.translate(&request("names of all deposits")).unwrap();
        let report = engine.validate_framework(&response.sql);
        assert!(report.is_compliant(), "{reply} → {}: {:?}", response.sql, report.diagnostics);
        assert!(matches!(
            response.validation.status,
            ValidationStatus::Accepted | ValidationStatus::Corrected
        ));
    }
}

#[test]
fn response_round_trips_through_json() {
    let index = StaticIndex::empty();
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));
    let engine = TranslationEngine::new(
        &index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );

    let response = engine.translate(&request("names of all deposits")).unwrap();
    let json = serde_json::to_string(&response).unwrap();
    let decoded: palisade_core::models::TranslationResponse =
        serde_json::from_str(&json).unwrap();
    assert_eq!(decoded.sql, response.sql);
    assert_eq!(decoded.source, response.source);
    assert_eq!(decoded.validation.status, response.validation.status);
}

// ─── Health ───

#[test]
fn health_reflects_collaborator_reachability() {
    let store = MemoryCacheStore::new(100);
    let calls = Arc::new(AtomicUsize::new(0));

    let healthy_index = StaticIndex::empty();
    let engine = TranslationEngine::new(
        &healthy_index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );
    assert_eq!(engine.health().overall_status, HealthStatus::Healthy);

    let down_index = StaticIndex::down();
    let degraded = TranslationEngine::new(
        &down_index,
        &store,
        chain_replying(COMPLIANT_SQL, &calls),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );
    assert_eq!(degraded.health().overall_status, HealthStatus::Degraded);

    let no_providers = TranslationEngine::new(
        &healthy_index,
        &store,
        ProviderChain::new(no_backoff()),
        SCHEMA,
        quiet_config(),
        FrameworkRules::default(),
    );
    assert_eq!(no_providers.health().overall_status, HealthStatus::Unhealthy);
}
