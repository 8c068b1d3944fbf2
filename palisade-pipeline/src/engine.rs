//! TranslationEngine: the end-to-end orchestrator.
//!
//! Collaborators are injected at construction; one engine serves any
//! number of concurrent requests because a pipeline run keeps no state
//! outside its own stack frame.

use std::time::Instant;

use palisade_cache::{derive_key, CacheGate};
use palisade_compliance::syntax;
use palisade_compliance::{ComplianceAnalyzer, ComplianceCorrector};
use palisade_core::config::{FrameworkRules, PipelineConfig};
use palisade_core::errors::{PalisadeError, PalisadeResult};
use palisade_core::models::{
    ComplianceReport, ConsistencyVerdict, HealthReport, SimilarQuery, SqlSource,
    TranslationRequest, TranslationResponse, ValidationResult, ValidationStatus,
};
use palisade_core::traits::{ICacheStore, IVectorIndex};
use palisade_generation::{GeneratedSql, GenerationStage, ProviderChain};
use palisade_retrieval::{ConsistencyChecker, RetrievalOutcome, RetrievalStage};
use tracing::{debug, info, warn};

use crate::health;
use crate::input;
use crate::state::PipelineState;

/// The translation pipeline with its collaborators.
pub struct TranslationEngine<'a> {
    index: &'a dyn IVectorIndex,
    store: &'a dyn ICacheStore,
    chain: ProviderChain,
    schema: String,
    config: PipelineConfig,
    rules: FrameworkRules,
}

impl<'a> TranslationEngine<'a> {
    pub fn new(
        index: &'a dyn IVectorIndex,
        store: &'a dyn ICacheStore,
        chain: ProviderChain,
        schema: impl Into<String>,
        config: PipelineConfig,
        rules: FrameworkRules,
    ) -> Self {
        Self {
            index,
            store,
            chain,
            schema: schema.into(),
            config,
            rules,
        }
    }

    /// Translate one natural-language request into validated SQL.
    ///
    /// Every returned response satisfies the compliance invariant; the
    /// only caller-visible failures are uncorrectable framework
    /// violations and provider exhaustion.
    pub fn translate(&self, request: &TranslationRequest) -> PalisadeResult<TranslationResponse> {
        let started = Instant::now();
        debug!(state = %PipelineState::Received, "pipeline started");

        let text = input::validate(request)?;

        let key = derive_key(
            &text,
            request.provider.as_deref(),
            request.model.as_deref(),
            &request.schema_id,
        );
        let gate = CacheGate::new(self.store, self.config.cache_ttl_secs, self.config.cache_enabled);

        // The bypass flag disables the lookup only; the store below
        // still runs, refreshing the entry for non-bypassing callers.
        if request.use_cache {
            if let Some(mut hit) = gate.lookup(&key) {
                hit.source = SqlSource::Cache;
                hit.processing_ms = elapsed_ms(started);
                info!(state = %PipelineState::CacheHit, "served from cache");
                return Ok(hit);
            }
        }

        let generation = GenerationStage::new(
            &self.chain,
            &self.rules,
            &self.config.domain,
            self.config.max_examples,
        );

        if self.config.relevance_check
            && !generation.check_relevance(
                &text,
                request.provider.as_deref(),
                request.model.as_deref(),
            )
        {
            return Err(PalisadeError::RelevanceRejection {
                reason: format!(
                    "the question does not concern the {} domain this database covers",
                    self.config.domain
                ),
            });
        }

        debug!(state = %PipelineState::Retrieving, "similarity search");
        let retrieval = RetrievalStage::new(
            self.index,
            self.config.top_k,
            self.config.exact_match_threshold,
        );
        let outcome = retrieval.retrieve(&text);

        let similar_queries = request.include_similar.then(|| {
            outcome
                .candidates
                .iter()
                .map(|c| SimilarQuery {
                    score: c.score,
                    text: c.text.clone(),
                    sql: c.sql.clone(),
                })
                .collect::<Vec<_>>()
        });

        let mut consistency = None;
        let mut provider = None;
        let mut model = None;
        let mut source = SqlSource::Generated;

        let candidate_sql = match retrieval.exact_match(&outcome) {
            Some(top) => match ConsistencyChecker::check(top, &text) {
                ConsistencyVerdict::Consistent => {
                    debug!(
                        state = %PipelineState::ExactMatchCandidate,
                        score = top.score,
                        "authoritative retrieved candidate"
                    );
                    consistency = Some(ConsistencyVerdict::Consistent);
                    source = SqlSource::ExactMatch;
                    top.sql.clone()
                }
                verdict @ ConsistencyVerdict::Inconsistent { .. } => {
                    consistency = Some(verdict);
                    self.generate(&generation, &text, request, &outcome, &mut provider, &mut model)?
                }
            },
            None => {
                self.generate(&generation, &text, request, &outcome, &mut provider, &mut model)?
            }
        };

        debug!(state = %PipelineState::Validating, "compliance validation");
        let (sql, validation) = self.validate(candidate_sql, consistency)?;

        let explanation = request
            .explain
            .then(|| {
                generation.explain(
                    &sql,
                    &text,
                    request.provider.as_deref(),
                    request.model.as_deref(),
                )
            })
            .flatten();

        if request.store_result {
            retrieval.store(&text, &sql);
        }

        let response = TranslationResponse {
            sql,
            validation,
            explanation,
            source,
            provider,
            model,
            similar_queries,
            processing_ms: elapsed_ms(started),
        };

        // One atomic write, only after the full ValidationResult exists.
        gate.store(&key, &response);

        info!(
            state = %PipelineState::Responded,
            status = ?response.validation.status,
            source = ?response.source,
            ms = response.processing_ms,
            "pipeline complete"
        );
        Ok(response)
    }

    /// Read-only diagnostic entry point: analyze without correcting.
    pub fn validate_framework(&self, sql: &str) -> ComplianceReport {
        ComplianceAnalyzer::new(&self.rules).analyze(sql)
    }

    /// Per-collaborator reachability.
    pub fn health(&self) -> HealthReport {
        health::build(self.index, self.store, &self.chain)
    }

    fn generate(
        &self,
        generation: &GenerationStage<'_>,
        question: &str,
        request: &TranslationRequest,
        outcome: &RetrievalOutcome,
        provider: &mut Option<String>,
        model: &mut Option<String>,
    ) -> PalisadeResult<String> {
        debug!(
            state = %PipelineState::Generating,
            examples = outcome.candidates.len(),
            retrieval_degraded = outcome.degraded,
            "generating fresh SQL"
        );
        match generation.generate_sql(
            question,
            &self.schema,
            &outcome.candidates,
            request.provider.as_deref(),
            request.model.as_deref(),
        )? {
            GeneratedSql::Sql(completion) => {
                *provider = Some(completion.provider);
                *model = Some(completion.model);
                Ok(completion.text)
            }
            GeneratedSql::OutOfDomain => Err(PalisadeError::RelevanceRejection {
                reason: "the question cannot be answered from the governed schema".to_string(),
            }),
            GeneratedSql::ReadOnlyRefused => Err(palisade_core::errors::ComplianceError::ReadOnlyViolation {
                detail: "the question asks for a write operation; only read queries are answered"
                    .to_string(),
            }
            .into()),
        }
    }

    /// Analyze, correct at most once, re-analyze. Rejection is reached
    /// only for the two uncorrectable violations.
    fn validate(
        &self,
        sql: String,
        consistency: Option<ConsistencyVerdict>,
    ) -> PalisadeResult<(String, ValidationResult)> {
        let analyzer = ComplianceAnalyzer::new(&self.rules);

        let report = analyzer.analyze(&sql);
        if report.is_compliant() {
            debug!(state = %PipelineState::Accepted, "compliant as produced");
            let syntax_valid = syntax::check(&sql).valid;
            return Ok((
                sql,
                ValidationResult {
                    report,
                    syntax_valid,
                    consistency,
                    status: ValidationStatus::Accepted,
                },
            ));
        }

        let corrected = ComplianceCorrector::new(&self.rules)
            .correct(&sql, &report)
            .map_err(|e| {
                warn!(state = %PipelineState::Rejected, error = %e, "uncorrectable violation");
                PalisadeError::from(e)
            })?;

        debug!(state = %PipelineState::Corrected, "auto-correction applied");
        let report = analyzer.analyze(&corrected);
        let syntax_valid = syntax::check(&corrected).valid;
        Ok((
            corrected,
            ValidationResult {
                report,
                syntax_valid,
                consistency,
                status: ValidationStatus::Corrected,
            },
        ))
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
