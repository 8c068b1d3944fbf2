//! Generation stage: prompt assembly → provider chain → post-processing.

use palisade_core::config::FrameworkRules;
use palisade_core::constants::{SENTINEL_IMPOSSIBLE, SENTINEL_READONLY_VIOLATION};
use palisade_core::errors::ProviderError;
use palisade_core::models::CandidateMatch;
use tracing::{debug, warn};

use crate::chain::{Completion, ProviderChain};
use crate::prompts;

/// Outcome of one generation attempt.
#[derive(Debug)]
pub enum GeneratedSql {
    /// A SQL candidate, not yet validated.
    Sql(Completion),
    /// The model judged the question unanswerable from the schema.
    OutOfDomain,
    /// The model judged the question to ask for a write operation.
    ReadOnlyRefused,
}

/// Drives the provider chain for SQL generation, the relevance
/// pre-check, and explanation generation.
pub struct GenerationStage<'a> {
    chain: &'a ProviderChain,
    rules: &'a FrameworkRules,
    domain: &'a str,
    max_examples: usize,
}

impl<'a> GenerationStage<'a> {
    pub fn new(
        chain: &'a ProviderChain,
        rules: &'a FrameworkRules,
        domain: &'a str,
        max_examples: usize,
    ) -> Self {
        Self {
            chain,
            rules,
            domain,
            max_examples,
        }
    }

    /// Generate a SQL candidate for `question`, using up to
    /// `max_examples` retrieved candidates as in-context examples.
    pub fn generate_sql(
        &self,
        question: &str,
        schema: &str,
        examples: &[CandidateMatch],
        preferred: Option<&str>,
        model: Option<&str>,
    ) -> Result<GeneratedSql, ProviderError> {
        let shown = &examples[..examples.len().min(self.max_examples)];
        let messages = prompts::sql_messages(question, schema, shown, self.rules);
        let mut completion = self.chain.complete(&messages, preferred, model)?;
        completion.text = prompts::strip_code_fences(&completion.text);

        let upper = completion.text.to_ascii_uppercase();
        if upper == SENTINEL_IMPOSSIBLE {
            debug!("model reported the question as out of domain");
            return Ok(GeneratedSql::OutOfDomain);
        }
        if upper == SENTINEL_READONLY_VIOLATION {
            debug!("model reported a requested write operation");
            return Ok(GeneratedSql::ReadOnlyRefused);
        }
        Ok(GeneratedSql::Sql(completion))
    }

    /// Whether the question belongs to the governed domain.
    ///
    /// Permissive on provider failure: a skipped pre-check only defers
    /// the decision to generation, never returns unsafe SQL.
    pub fn check_relevance(
        &self,
        question: &str,
        preferred: Option<&str>,
        model: Option<&str>,
    ) -> bool {
        let messages = prompts::relevance_messages(question, self.domain);
        match self.chain.complete(&messages, preferred, model) {
            Ok(completion) => completion.text.to_ascii_uppercase().contains("YES"),
            Err(e) => {
                warn!(error = %e, "relevance pre-check unavailable, skipping");
                true
            }
        }
    }

    /// Natural-language explanation of validated SQL. Failures are
    /// absorbed; the response simply carries no explanation.
    pub fn explain(
        &self,
        sql: &str,
        question: &str,
        preferred: Option<&str>,
        model: Option<&str>,
    ) -> Option<String> {
        let messages = prompts::explanation_messages(sql, question);
        match self.chain.complete(&messages, preferred, model) {
            Ok(completion) => Some(completion.text.trim().to_string()),
            Err(e) => {
                warn!(error = %e, "explanation generation failed, continuing without");
                None
            }
        }
    }
}
