//! Auto-correction of non-compliant statements.
//!
//! Bounded fixed-point repair: one corrective pass per missing-flag
//! category, re-analyzing between passes, never guessing schema
//! relationships. Read-only violations and a missing anchor table are
//! uncorrectable and fail closed.

use palisade_core::config::FrameworkRules;
use palisade_core::constants::PERIOD_MARKER;
use palisade_core::errors::ComplianceError;
use palisade_core::models::ComplianceReport;
use tracing::debug;

use crate::analyzer::ComplianceAnalyzer;
use crate::lexer::{self, Token, TokenKind};

/// Keywords a new WHERE clause must precede.
const POST_WHERE_KEYWORDS: &[&str] = &["GROUP", "ORDER", "HAVING", "LIMIT", "OFFSET", "FETCH"];

/// Repairs statements that failed analysis, without altering their
/// business semantics.
pub struct ComplianceCorrector<'a> {
    rules: &'a FrameworkRules,
}

impl<'a> ComplianceCorrector<'a> {
    pub fn new(rules: &'a FrameworkRules) -> Self {
        Self { rules }
    }

    /// Correct `sql` according to `report`. Applying this to an already
    /// compliant statement is a no-op, and the operation is idempotent:
    /// a successful result re-analyzes as fully compliant, so a second
    /// pass returns it unchanged.
    pub fn correct(
        &self,
        sql: &str,
        report: &ComplianceReport,
    ) -> Result<String, ComplianceError> {
        if !report.is_read_only {
            let detail = report
                .diagnostics
                .first()
                .cloned()
                .unwrap_or_else(|| "write verb at statement start".to_string());
            return Err(ComplianceError::ReadOnlyViolation { detail });
        }
        if !report.has_anchor_table {
            return Err(ComplianceError::MissingAnchorTable {
                anchor_table: self.rules.anchor_table.clone(),
            });
        }
        if report.is_compliant() {
            return Ok(sql.to_string());
        }

        let analyzer = ComplianceAnalyzer::new(self.rules);
        let mut current = sql.trim().to_string();
        let mut rep = report.clone();

        if !rep.has_user_filter {
            current = inject_user_filter(&current, &rep, self.rules);
            debug!("injected tenant filter");
            rep = analyzer.analyze(&current);
        }

        if !rep.has_required_markers {
            current = append_markers(&current, &rep, self.rules);
            debug!("appended trailing markers");
            rep = analyzer.analyze(&current);
        }

        if !rep.is_compliant() {
            return Err(ComplianceError::CorrectionIncomplete {
                diagnostics: rep.diagnostics,
            });
        }
        Ok(current)
    }
}

/// Inject `<alias>.<user_id_column> = <placeholder>` into the first
/// statement: AND-prepended to an existing top-level WHERE, otherwise a
/// new WHERE clause before GROUP BY / ORDER BY / the terminator.
fn inject_user_filter(sql: &str, report: &ComplianceReport, rules: &FrameworkRules) -> String {
    // The corrector only runs with at least one anchor alias (checked
    // by the caller).
    let alias = &report.anchor_aliases[0];
    let filter = rules.user_filter(alias);

    let lex = lexer::tokenize(sql);
    let sig: Vec<&Token> = lex.tokens.iter().filter(|t| t.is_significant()).collect();

    // Existing top-level WHERE in the first statement.
    for tok in &sig {
        if tok.is_symbol(";") && tok.depth == 0 {
            break;
        }
        if tok.is_word_ci("WHERE") && tok.depth == 0 {
            let mut out = String::with_capacity(sql.len() + filter.len() + 5);
            out.push_str(&sql[..tok.end]);
            out.push(' ');
            out.push_str(&filter);
            out.push_str(" AND");
            out.push_str(&sql[tok.end..]);
            return out;
        }
    }

    // No WHERE: insert one before the first top-level GROUP/ORDER/...
    // keyword, else before the terminator, else before the trailing
    // markers, else at the end.
    let mut target: Option<usize> = None;
    for (idx, tok) in sig.iter().enumerate() {
        if tok.depth != 0 {
            continue;
        }
        if tok.is_symbol(";") {
            target = Some(idx);
            break;
        }
        if tok.kind == TokenKind::Word
            && POST_WHERE_KEYWORDS
                .iter()
                .any(|k| tok.text.eq_ignore_ascii_case(k))
        {
            target = Some(idx);
            break;
        }
    }
    if target.is_none() {
        // Trailing marker run, when the statement has no terminator.
        let mut first_marker = None;
        for (idx, tok) in sig.iter().enumerate().rev() {
            if tok.kind == TokenKind::Marker {
                first_marker = Some(idx);
            } else {
                break;
            }
        }
        target = first_marker;
    }

    let pos = match target {
        // Splice after the token preceding the target so original
        // spacing is preserved.
        Some(0) => 0,
        Some(idx) => sig[idx - 1].end,
        None => sql.trim_end().len(),
    };

    let mut out = String::with_capacity(sql.len() + filter.len() + 8);
    out.push_str(&sql[..pos]);
    out.push_str(" WHERE ");
    out.push_str(&filter);
    out.push_str(&sql[pos..]);
    out
}

/// Append the minimal marker set after the statement terminator: the
/// anchor marker always, the fact marker iff a fact alias was found,
/// and the period marker when the statement touches temporal columns.
fn append_markers(sql: &str, report: &ComplianceReport, rules: &FrameworkRules) -> String {
    let mut names = vec![rules.anchor_marker(&report.anchor_aliases[0])];
    if let Some(fact_alias) = report.fact_aliases.first() {
        names.push(rules.fact_marker(fact_alias));
    }
    if mentions_temporal_column(sql, rules) {
        names.push(PERIOD_MARKER.to_string());
    }

    let missing: Vec<String> = names
        .into_iter()
        .filter(|n| {
            !report
                .markers_found
                .iter()
                .any(|m| m.eq_ignore_ascii_case(n))
        })
        .map(|n| format!("#{n}#"))
        .collect();

    if missing.is_empty() {
        return sql.to_string();
    }
    format!("{} {}", sql.trim_end(), missing.join(" "))
}

/// Whether any structural word matches a configured temporal column.
fn mentions_temporal_column(sql: &str, rules: &FrameworkRules) -> bool {
    let lex = lexer::tokenize(sql);
    lex.tokens.iter().any(|t| {
        t.kind == TokenKind::Word
            && rules
                .temporal_columns
                .iter()
                .any(|c| t.text.eq_ignore_ascii_case(c))
    })
}
